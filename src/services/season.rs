use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::aggregation::reconcile_standings;
use crate::api::ScheduleClient;
use crate::cache::Cache;
use crate::config::AppConfig;
use crate::domain::{Game, Season, SeasonKey, Standing};
use crate::fetchers::{PageFetcher, StandingsScraper};
use crate::http::HttpClient;

/// Schedule and standings of one live season, written to `season-<name>.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonFile {
    pub season: Season,
    pub games: Vec<Game>,
    pub standings: Vec<Standing>,
    pub fetched_at: DateTime<Utc>,
}

impl SeasonFile {
    pub fn new(season: Season, games: Vec<Game>, scraped: Vec<Standing>) -> Self {
        let standings = reconcile_standings(scraped, &games, season.slug());
        Self {
            season,
            games,
            standings,
            fetched_at: Utc::now(),
        }
    }

    pub fn cache_key(season: Season) -> String {
        format!("season-{}", season.slug())
    }
}

/// Single-season sync: schedule and standings only
pub struct SeasonService {
    schedule: ScheduleClient,
    standings: StandingsScraper,
    cache: Cache,
    club: String,
}

impl SeasonService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = HttpClient::new(&config.scraper.user_agent, config.scraper.timeout_secs)?;
        let pages = PageFetcher::new(client.clone(), &config.scraper.base_url);

        Ok(Self {
            schedule: ScheduleClient::new(client, &config.scraper.api_url, &config.scraper.league),
            standings: StandingsScraper::new(pages),
            cache: Cache::new(&config.output.data_dir)?,
            club: config.club.name.clone(),
        })
    }

    pub async fn run(&self, season: Season) -> Result<SeasonFile> {
        info!("=== Fetching {} season ===", season);

        let key = SeasonKey::current(season);
        let (schedule, standings) = tokio::try_join!(
            self.schedule.fetch_schedule(&key, &self.club),
            self.standings.fetch_standings(&key),
        )?;

        let file = SeasonFile::new(season, schedule.games, standings);
        self.cache.save(&SeasonFile::cache_key(season), &file)?;

        info!(
            "=== Saved {} games and {} standings rows ===",
            file.games.len(),
            file.standings.len()
        );
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GameType;

    fn played(away: &str, away_score: u32, home: &str, home_score: u32) -> Game {
        Game {
            id: "1".to_string(),
            date: "2026-02-01".to_string(),
            time: "9:15 PM".to_string(),
            venue: "Rink 1".to_string(),
            away_team: away.to_string(),
            home_team: home.to_string(),
            away_score: Some(away_score).into(),
            home_score: Some(home_score).into(),
            game_type: GameType::Regular,
            type_name: String::new(),
            is_club_game: false,
            is_home: false,
        }
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(SeasonFile::cache_key(Season::Spring), "season-spring");
    }

    #[test]
    fn test_missing_table_falls_back_to_schedule() {
        let file = SeasonFile::new(Season::Winter, vec![played("Ice Dogs", 5, "Polar Bears", 2)], Vec::new());

        assert_eq!(file.standings.len(), 2);
        assert_eq!(file.standings[0].team, "Ice Dogs");
        assert_eq!(file.standings[0].points, 2);
    }

    #[test]
    fn test_season_file_json_shape() {
        let file = SeasonFile::new(Season::Summer, Vec::new(), vec![Standing::new("Ice Dogs")]);
        let json = serde_json::to_value(&file).unwrap();

        assert_eq!(json["season"], "summer");
        assert_eq!(json["standings"][0]["gamesPlayed"], 0);
        assert!(json.get("fetchedAt").is_some());
    }
}
