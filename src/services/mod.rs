pub mod calendar;
pub mod season;
pub mod source;
pub mod sync;

pub use calendar::CalendarService;
pub use season::SeasonService;
pub use source::{FetchedSeason, LeagueSource, SeasonSource};
pub use sync::{SyncMode, SyncReport, SyncService};
