mod collection;
pub mod models;
mod progress;
pub mod season;
pub mod summary;

pub use collection::SeasonCollection;
pub use models::*;
pub use progress::FetchProgress;
pub use season::{Season, SeasonKey};
pub use summary::*;
