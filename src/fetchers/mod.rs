pub mod archive_scraper;
pub mod pages;
pub mod roster_scraper;
pub mod standings_scraper;
pub mod stats_scraper;

pub use archive_scraper::ArchiveScraper;
pub use pages::PageFetcher;
pub use roster_scraper::RosterScraper;
pub use standings_scraper::StandingsScraper;
pub use stats_scraper::{SeasonStats, StatsScraper};
