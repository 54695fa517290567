pub mod standings;
pub mod summary;

pub use standings::{cross_check, reconcile_standings, sort_standings, standings_from_games};
pub use summary::{all_time_summary, club_season_summary, is_champion};
