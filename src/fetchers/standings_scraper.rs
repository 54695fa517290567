use anyhow::Result;
use log::{debug, info};
use scraper::Html;

use super::pages::PageFetcher;
use crate::domain::{SeasonKey, Standing};
use crate::html::extract::{cell_text, parse_count};
use crate::html::{LocatedTable, TableSignature, find_table};

const STANDINGS_TABLE: TableSignature<'static> = TableSignature::new(&["GP", "W", "L"]);
const MIN_CELLS: usize = 8;

/// Scraper for the standings page
pub struct StandingsScraper {
    pages: PageFetcher,
}

impl StandingsScraper {
    pub fn new(pages: PageFetcher) -> Self {
        Self { pages }
    }

    /// Standings of one season; empty when the page has no standings table
    pub async fn fetch_standings(&self, key: &SeasonKey) -> Result<Vec<Standing>> {
        let body = self.pages.fetch_page(key, "standings").await?;
        let standings = parse_standings(&Html::parse_document(&body));
        info!("  {}: {} standings rows", key, standings.len());
        Ok(standings)
    }
}

/// Column positions, by header name with a positional fallback
struct Columns {
    team: usize,
    games_played: usize,
    wins: usize,
    losses: usize,
    ties: Option<usize>,
    points: usize,
    goals_for: usize,
    goals_against: usize,
}

impl Columns {
    fn resolve(table: &LocatedTable<'_>) -> Self {
        let ties = table.column(&["T", "Ties"]);
        // Without a ties column everything after L shifts one to the left
        let shift = usize::from(ties.is_none());
        Self {
            team: table.column(&["Team", "Name"]).unwrap_or(0),
            games_played: table.column(&["GP"]).unwrap_or(1),
            wins: table.column(&["W"]).unwrap_or(2),
            losses: table.column(&["L"]).unwrap_or(3),
            ties,
            points: table.column(&["PTS", "P"]).unwrap_or(5 - shift),
            goals_for: table.column(&["GF"]).unwrap_or(6 - shift),
            goals_against: table.column(&["GA"]).unwrap_or(7 - shift),
        }
    }
}

/// Parse the standings table; rows shorter than eight cells or without a team are skipped
pub fn parse_standings(document: &Html) -> Vec<Standing> {
    let Some(table) = find_table(document, &STANDINGS_TABLE) else {
        debug!("No standings table on page");
        return Vec::new();
    };

    let columns = Columns::resolve(&table);
    table
        .row_cells()
        .filter(|cells| cells.len() >= MIN_CELLS)
        .filter_map(|cells| {
            let text: Vec<String> = cells.into_iter().map(cell_text).collect();
            let count = |index: usize| text.get(index).map_or(0, |cell| parse_count(cell));

            let team = text.get(columns.team).cloned().unwrap_or_default();
            if team.is_empty() {
                return None;
            }

            let games_played = count(columns.games_played);
            let wins = count(columns.wins);
            let losses = count(columns.losses);
            let ties = columns
                .ties
                .map_or_else(|| games_played.saturating_sub(wins.saturating_add(losses)), count);

            Some(Standing {
                team,
                games_played,
                wins,
                losses,
                ties,
                points: count(columns.points),
                goals_for: count(columns.goals_for),
                goals_against: count(columns.goals_against),
            })
        })
        .collect()
}
