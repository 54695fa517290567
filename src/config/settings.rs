use std::env;
use std::path::PathBuf;

pub struct ScraperSettings {
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Seasons fetched at the same time
    pub max_concurrent: usize,
    pub base_url: String,
    pub api_url: String,
    pub league: String,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            user_agent: "LeagueSync/1.0".to_string(),
            timeout_secs: 30,
            max_concurrent: 3,
            base_url: "https://www.rinkleague.com".to_string(),
            api_url: "https://api.rinkleague.com/v1/data".to_string(),
            league: "adult-rec".to_string(),
        }
    }
}

pub struct ClubSettings {
    pub name: String,
}

impl Default for ClubSettings {
    fn default() -> Self {
        Self {
            name: "Ice Dogs".to_string(),
        }
    }
}

pub struct OutputSettings {
    pub data_dir: PathBuf,
    pub snapshot_key: &'static str,
    pub events_key: &'static str,
    pub manual_events_key: &'static str,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            snapshot_key: "league",
            events_key: "events",
            manual_events_key: "manual-events",
        }
    }
}

pub struct AppConfig {
    pub scraper: ScraperSettings,
    pub club: ClubSettings,
    pub output: OutputSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            scraper: ScraperSettings::default(),
            club: ClubSettings::default(),
            output: OutputSettings::default(),
        }
    }

    /// Defaults with optional overrides from the environment
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Some(url) = read_var("LEAGUE_BASE_URL") {
            config.scraper.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = read_var("LEAGUE_API_URL") {
            config.scraper.api_url = url;
        }
        if let Some(league) = read_var("LEAGUE_NAME") {
            config.scraper.league = league;
        }
        if let Some(club) = read_var("LEAGUE_CLUB") {
            config.club.name = club;
        }
        if let Some(dir) = read_var("LEAGUE_DATA_DIR") {
            config.output.data_dir = PathBuf::from(dir);
        }
        config
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Credentials of the companion calendar sync
pub struct CalendarSettings {
    pub calendar_id: String,
    pub api_key: String,
    pub max_pages: usize,
}

impl CalendarSettings {
    pub const CALENDAR_ID_VAR: &'static str = "GOOGLE_CALENDAR_ID";
    pub const API_KEY_VAR: &'static str = "GOOGLE_API_KEY";

    /// Both variables are required; a missing one is a configuration error
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(read_var)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let calendar_id = lookup(Self::CALENDAR_ID_VAR)
            .ok_or_else(|| anyhow::anyhow!(crate::errors::missing_setting(Self::CALENDAR_ID_VAR)))?;
        let api_key = lookup(Self::API_KEY_VAR)
            .ok_or_else(|| anyhow::anyhow!(crate::errors::missing_setting(Self::API_KEY_VAR)))?;

        Ok(Self {
            calendar_id,
            api_key,
            max_pages: 20,
        })
    }
}
