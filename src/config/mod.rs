pub mod archives;
pub mod settings;

pub use archives::get_archive_seasons;
pub use settings::{AppConfig, CalendarSettings};
