pub mod pagination;
pub mod schedule;

pub use pagination::next_page_token;
pub use schedule::{DecodedSchedule, decode_schedule};
