pub mod models;
pub mod parsers;
pub mod schedule_client;

pub use schedule_client::ScheduleClient;
