use anyhow::Result;
use log::info;

use crate::aggregation::reconcile_standings;
use crate::api::ScheduleClient;
use crate::config::AppConfig;
use crate::domain::{Championship, SeasonData, SeasonKey};
use crate::fetchers::{ArchiveScraper, PageFetcher, RosterScraper, StandingsScraper, StatsScraper};
use crate::http::HttpClient;

/// One season as returned by a source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedSeason {
    pub data: SeasonData,
    /// Schedule records dropped during decoding
    pub skipped: usize,
}

/// Where the sync reads league data from
#[allow(async_fn_in_trait)]
pub trait SeasonSource {
    async fn fetch_championships(&self) -> Result<Vec<Championship>>;

    async fn fetch_season(&self, key: &SeasonKey) -> Result<FetchedSeason>;
}

/// The league website and its schedule API
pub struct LeagueSource {
    schedule: ScheduleClient,
    standings: StandingsScraper,
    stats: StatsScraper,
    rosters: RosterScraper,
    archives: ArchiveScraper,
    club: String,
}

impl LeagueSource {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = HttpClient::new(&config.scraper.user_agent, config.scraper.timeout_secs)?;
        let pages = PageFetcher::new(client.clone(), &config.scraper.base_url);

        Ok(Self {
            schedule: ScheduleClient::new(client, &config.scraper.api_url, &config.scraper.league),
            standings: StandingsScraper::new(pages.clone()),
            stats: StatsScraper::new(pages.clone()),
            rosters: RosterScraper::new(pages.clone()),
            archives: ArchiveScraper::new(pages),
            club: config.club.name.clone(),
        })
    }
}

impl SeasonSource for LeagueSource {
    async fn fetch_championships(&self) -> Result<Vec<Championship>> {
        self.archives.fetch_championships().await
    }

    /// All four requests must succeed for the season to count
    async fn fetch_season(&self, key: &SeasonKey) -> Result<FetchedSeason> {
        info!("Fetching {}...", key);

        let (schedule, standings, stats, roster) = tokio::try_join!(
            self.schedule.fetch_schedule(key, &self.club),
            self.standings.fetch_standings(key),
            self.stats.fetch_stats(key),
            self.rosters.fetch_rosters(key),
        )?;

        let standings = reconcile_standings(standings, &schedule.games, &key.to_string());

        Ok(FetchedSeason {
            data: SeasonData {
                games: schedule.games,
                standings,
                player_stats: stats.players,
                goalie_stats: stats.goalies,
                roster,
            },
            skipped: schedule.skipped,
        })
    }
}
