use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use colored::Colorize;
use futures::stream::{self, StreamExt};
use log::{info, warn};

use super::source::{FetchedSeason, SeasonSource};
use crate::aggregation::{all_time_summary, club_season_summary};
use crate::cache::Cache;
use crate::config::{AppConfig, get_archive_seasons};
use crate::domain::{
    AllTimeSummary, Championship, ClubSeasonSummary, FetchProgress, Season, SeasonCollection, SeasonKey, Snapshot,
};

/// Which seasons one sync fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Winter, spring and summer, merged into the existing snapshot
    AllSeasons,
    /// Only the season the given date falls in, merged into the existing snapshot
    CurrentOnly,
    /// All three live seasons plus the archive backfill; replaces the snapshot
    WithArchives,
}

impl SyncMode {
    pub fn from_flags(current_only: bool, with_archives: bool) -> Self {
        match (current_only, with_archives) {
            (true, _) => SyncMode::CurrentOnly,
            (false, true) => SyncMode::WithArchives,
            (false, false) => SyncMode::AllSeasons,
        }
    }

    pub fn season_keys(&self, today: NaiveDate) -> Vec<SeasonKey> {
        let live = Season::ALL.iter().copied().map(SeasonKey::current);
        match self {
            SyncMode::CurrentOnly => vec![SeasonKey::current(Season::current(today))],
            SyncMode::AllSeasons => live.collect(),
            SyncMode::WithArchives => live.chain(get_archive_seasons()).collect(),
        }
    }

    fn merges_previous(&self) -> bool {
        !matches!(self, SyncMode::WithArchives)
    }
}

/// What one sync did, for the end-of-run report
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub seasons: usize,
    pub games: usize,
    pub championships: usize,
    pub carried_over: usize,
    pub skipped_records: usize,
    pub failed: Vec<String>,
    pub club: String,
    pub club_summary: AllTimeSummary,
}

impl SyncReport {
    pub fn print(&self) {
        println!();
        println!("{}", "Sync complete".green().bold());
        println!("  Seasons:        {} ({} carried over)", self.seasons, self.carried_over);
        println!("  Games:          {}", self.games);
        println!("  Championships:  {}", self.championships);
        println!(
            "  {}:  {}-{}-{} over {} seasons, {} titles",
            self.club.bold(),
            self.club_summary.wins,
            self.club_summary.losses,
            self.club_summary.ties,
            self.club_summary.seasons,
            self.club_summary.titles
        );

        if self.skipped_records > 0 {
            println!("  {}", format!("Skipped records: {}", self.skipped_records).yellow());
        }
        if !self.failed.is_empty() {
            println!("  {}", format!("Failed seasons: {}", self.failed.join(", ")).yellow());
        }
    }
}

/// Fetches seasons and championships, merges them with the stored snapshot
/// and writes the result
pub struct SyncService<S> {
    source: S,
    cache: Cache,
    snapshot_key: String,
    club: String,
    max_concurrent: usize,
}

impl<S: SeasonSource> SyncService<S> {
    pub fn new(source: S, cache: Cache, config: &AppConfig) -> Self {
        Self {
            source,
            cache,
            snapshot_key: config.output.snapshot_key.to_string(),
            club: config.club.name.clone(),
            max_concurrent: config.scraper.max_concurrent.max(1),
        }
    }

    pub async fn run(&self, mode: SyncMode, today: NaiveDate) -> Result<SyncReport> {
        info!("=== Starting League Sync ({:?}) ===\n", mode);

        // Step 1: Championships
        let championships = self.fetch_championships().await?;
        info!("  → {} championships\n", championships.len());

        // Step 2: Seasons
        let keys = mode.season_keys(today);
        let (mut collection, skipped_records, failed) = self.fetch_seasons(keys, mode).await?;
        info!("  → Fetched {} seasons with data\n", collection.len());

        // Step 3: Merge
        let carried_over = if mode.merges_previous() {
            self.merge_previous(&mut collection)?
        } else {
            0
        };

        // Step 4: Summaries
        let season_summaries = self.summarize(&collection, &championships);
        let club_summary = all_time_summary(&season_summaries);
        info!("  → Summarized {} club seasons\n", season_summaries.len());

        // Step 5: Persist
        let report = SyncReport {
            seasons: collection.len(),
            games: collection.game_count(),
            championships: championships.len(),
            carried_over,
            skipped_records,
            failed,
            club: self.club.clone(),
            club_summary: club_summary.clone(),
        };

        let snapshot = Snapshot {
            current_season: Season::current(today),
            current_year: today.year(),
            seasons: collection.into_map(),
            championships,
            club_summary,
            season_summaries,
            fetched_at: Utc::now(),
        };
        self.cache.save_snapshot(&self.snapshot_key, &snapshot)?;

        info!("=== Sync Complete ===");
        Ok(report)
    }

    async fn fetch_championships(&self) -> Result<Vec<Championship>> {
        info!("Step 1: Fetching championships...");
        self.source
            .fetch_championships()
            .await
            .context("Championship archive could not be fetched")
    }

    async fn fetch_seasons(
        &self,
        keys: Vec<SeasonKey>,
        mode: SyncMode,
    ) -> Result<(SeasonCollection, usize, Vec<String>)> {
        info!("Step 2: Fetching {} seasons...", keys.len());

        let mut progress = FetchProgress::new(keys.len());
        let mut collection = SeasonCollection::new();
        let mut skipped = 0;
        let mut failed = Vec::new();

        let mut results = stream::iter(keys)
            .map(|key| async move {
                let result = self.source.fetch_season(&key).await;
                (key, result)
            })
            .buffer_unordered(self.max_concurrent);

        while let Some((key, result)) = results.next().await {
            match result {
                Ok(FetchedSeason { data, skipped: dropped }) => {
                    skipped += dropped;
                    if data.is_empty() {
                        warn!("No data for {}", key);
                        progress.increment_empty();
                    } else {
                        collection.add(key, data);
                        progress.increment_fetched();
                    }
                }
                Err(e) if mode == SyncMode::CurrentOnly => {
                    return Err(e.context(format!("Current season {} could not be fetched", key)));
                }
                Err(e) => {
                    warn!("Skipping {}: {:#}", key, e);
                    failed.push(key.to_string());
                    progress.increment_failed();
                }
            }
        }

        failed.sort();
        Ok((collection, skipped, failed))
    }

    fn merge_previous(&self, collection: &mut SeasonCollection) -> Result<usize> {
        info!("Step 3: Merging with existing snapshot...");

        let Some(previous) = self.cache.load_snapshot(&self.snapshot_key)? else {
            info!("  → No existing snapshot");
            return Ok(0);
        };

        let carried = collection.merge_missing_from(previous.seasons);
        info!("  → Carried over {} seasons", carried);
        Ok(carried)
    }

    fn summarize(&self, collection: &SeasonCollection, championships: &[Championship]) -> Vec<ClubSeasonSummary> {
        info!("Step 4: Computing club summaries...");

        collection
            .iter()
            .filter_map(|(key, data)| {
                let key: SeasonKey = match key.parse() {
                    Ok(key) => key,
                    Err(e) => {
                        warn!("Ignoring season with unrecognized key {}: {}", key, e);
                        return None;
                    }
                };
                club_season_summary(&key, data, championships, &self.club)
            })
            .collect()
    }
}
