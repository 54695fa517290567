use anyhow::Result;
use log::info;
use scraper::Html;

use super::pages::PageFetcher;
use crate::domain::{GoalieStat, PlayerStat, SeasonKey};
use crate::html::extract::{cell_text, parse_count, team_from_logo};
use crate::html::{LocatedTable, TableSignature, find_tables};

const SKATER_TABLE: TableSignature<'static> = TableSignature::new(&["GP", "G", "A", "PTS"]).excluding(&["W"]);
const GOALIE_TABLE: TableSignature<'static> = TableSignature::new(&["W", "L", "GA", "SV"]);

const NAME: &[&str] = &["Name", "Player", "Goalie"];
const NUMBER: &[&str] = &["#", "No", "No.", "Number"];

/// Skater and goalie stats of one season
#[derive(Debug, Default)]
pub struct SeasonStats {
    pub players: Vec<PlayerStat>,
    pub goalies: Vec<GoalieStat>,
}

/// Scraper for the stats page (one skater and one goalie table per team)
pub struct StatsScraper {
    pages: PageFetcher,
}

impl StatsScraper {
    pub fn new(pages: PageFetcher) -> Self {
        Self { pages }
    }

    pub async fn fetch_stats(&self, key: &SeasonKey) -> Result<SeasonStats> {
        let body = self.pages.fetch_page(key, "stats").await?;
        let stats = parse_stats(&Html::parse_document(&body));
        info!(
            "  {}: {} skaters, {} goalies",
            key,
            stats.players.len(),
            stats.goalies.len()
        );
        Ok(stats)
    }
}

pub fn parse_stats(document: &Html) -> SeasonStats {
    let players = find_tables(document, &SKATER_TABLE)
        .flat_map(|table| parse_skater_table(&table))
        .collect();
    let goalies = find_tables(document, &GOALIE_TABLE)
        .flat_map(|table| parse_goalie_table(&table))
        .collect();

    SeasonStats { players, goalies }
}

/// A stats row: name and number pulled out, counts looked up by header
struct StatRow {
    name: String,
    number: String,
    cells: Vec<String>,
}

impl StatRow {
    fn count(&self, column: Option<usize>) -> u32 {
        column
            .and_then(|index| self.cells.get(index))
            .map_or(0, |cell| parse_count(cell))
    }
}

fn stat_rows(table: &LocatedTable<'_>) -> Vec<StatRow> {
    let name_column = table.column(NAME).unwrap_or(0);
    let number_column = table.column(NUMBER);

    table
        .row_cells()
        .filter_map(|cells| {
            let cells: Vec<String> = cells.into_iter().map(cell_text).collect();
            let name = cells.get(name_column).cloned().unwrap_or_default();
            if name.is_empty() || is_totals_row(&name) {
                return None;
            }
            let number = number_column
                .and_then(|index| cells.get(index))
                .map(|n| n.trim_start_matches('#').to_string())
                .unwrap_or_default();
            Some(StatRow { name, number, cells })
        })
        .collect()
}

fn is_totals_row(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower == "total" || lower == "totals" || lower.starts_with("team total")
}

fn parse_skater_table(table: &LocatedTable<'_>) -> Vec<PlayerStat> {
    let team = team_from_logo(table.element);
    let games_played = table.column(&["GP"]);
    let goals = table.column(&["G"]);
    let assists = table.column(&["A"]);
    let points = table.column(&["PTS"]);
    let penalty_minutes = table.column(&["PIM"]);

    stat_rows(table)
        .into_iter()
        .map(|row| PlayerStat {
            games_played: row.count(games_played),
            goals: row.count(goals),
            assists: row.count(assists),
            points: row.count(points),
            penalty_minutes: row.count(penalty_minutes),
            team: team.clone(),
            name: row.name,
            number: row.number,
        })
        .collect()
}

fn parse_goalie_table(table: &LocatedTable<'_>) -> Vec<GoalieStat> {
    let team = team_from_logo(table.element);
    let games_played = table.column(&["GP"]);
    let wins = table.column(&["W"]);
    let losses = table.column(&["L"]);
    let goals_against = table.column(&["GA"]);
    let saves = table.column(&["SV"]);
    let save_percentage = table.column(&["SV%", "SV %", "SVPCT"]);

    stat_rows(table)
        .into_iter()
        .map(|row| {
            let goals_against = row.count(goals_against);
            let saves = row.count(saves);
            let save_percentage = save_percentage
                .and_then(|index| row.cells.get(index))
                .and_then(|cell| parse_save_percentage(cell))
                .unwrap_or_else(|| computed_save_percentage(saves, goals_against));

            GoalieStat {
                games_played: row.count(games_played),
                wins: row.count(wins),
                losses: row.count(losses),
                goals_against,
                saves,
                save_percentage,
                team: team.clone(),
                name: row.name,
                number: row.number,
            }
        })
        .collect()
}

/// Accepts `.912`, `0.912` and `91.2` (percent); returns a 0..=1 fraction
fn parse_save_percentage(text: &str) -> Option<f64> {
    let value: f64 = text.trim().trim_end_matches('%').parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    if value > 1.0 { Some(value / 100.0) } else { Some(value) }
}

fn computed_save_percentage(saves: u32, goals_against: u32) -> f64 {
    let shots = saves.saturating_add(goals_against);
    if shots == 0 {
        return 0.0;
    }
    let fraction = f64::from(saves) / f64::from(shots);
    (fraction * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS_PAGE: &str = r#"
        <body>
        <div class="team-header"><img src="/images/logos/Ice_Dogs.png" alt=""></div>
        <table class="stats">
            <tr><th>#</th><th>Name</th><th>GP</th><th>G</th><th>A</th><th>PTS</th><th>PIM</th></tr>
            <tr><td>91</td><td>Ann Lee</td><td>10</td><td>8</td><td>6</td><td>14</td><td>2</td></tr>
            <tr><td>4</td><td>Bo Diaz</td><td>9</td><td>1</td><td>5</td><td>6</td><td>10</td></tr>
            <tr><td></td><td>Totals</td><td>10</td><td>9</td><td>11</td><td>20</td><td>12</td></tr>
        </table>
        <table class="stats">
            <tr><th>#</th><th>Name</th><th>GP</th><th>W</th><th>L</th><th>GA</th><th>SV</th><th>SV%</th></tr>
            <tr><td>30</td><td>Cy Park</td><td>10</td><td>7</td><td>3</td><td>22</td><td>228</td><td>.912</td></tr>
        </table>
        <div class="team-header"><img src="/images/logos/Polar_Bears_(Div_B).png" alt=""></div>
        <table class="stats">
            <tr><th>Name</th><th>#</th><th>GP</th><th>G</th><th>A</th><th>PTS</th></tr>
            <tr><td>Dee Fox</td><td>#12</td><td>10</td><td>3</td><td>3</td><td>6</td></tr>
        </table>
        <table class="stats">
            <tr><th>Name</th><th>GP</th><th>W</th><th>L</th><th>GA</th><th>SV</th></tr>
            <tr><td>Eli Ray</td><td>10</td><td>3</td><td>7</td><td>38</td><td>152</td></tr>
        </table>
        </body>
    "#;

    #[test]
    fn test_parse_stats_per_team_tables() {
        let stats = parse_stats(&Html::parse_document(STATS_PAGE));

        assert_eq!(stats.players.len(), 3);
        assert_eq!(stats.goalies.len(), 2);

        let ann = &stats.players[0];
        assert_eq!(ann.name, "Ann Lee");
        assert_eq!(ann.number, "91");
        assert_eq!(ann.team, "Ice Dogs");
        assert_eq!((ann.goals, ann.assists, ann.points, ann.penalty_minutes), (8, 6, 14, 2));

        let dee = &stats.players[2];
        assert_eq!(dee.team, "Polar Bears");
        assert_eq!(dee.number, "12");
        assert_eq!(dee.penalty_minutes, 0);

        assert_eq!(stats.goalies[0].team, "Ice Dogs");
        assert!((stats.goalies[0].save_percentage - 0.912).abs() < 1e-9);
        assert_eq!(stats.goalies[1].team, "Polar Bears");
        assert!((stats.goalies[1].save_percentage - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_stats_without_logo_keep_rows_with_empty_team() {
        let html = Html::parse_document(
            r#"<table><tr><th>Name</th><th>GP</th><th>G</th><th>A</th><th>PTS</th></tr>
               <tr><td>Solo Skater</td><td>1</td><td>1</td><td>0</td><td>1</td></tr></table>"#,
        );

        let stats = parse_stats(&html);
        assert_eq!(stats.players.len(), 1);
        assert_eq!(stats.players[0].team, "");
        assert!(stats.goalies.is_empty());
    }

    #[test]
    fn test_parse_save_percentage_formats() {
        assert_eq!(parse_save_percentage(".900"), Some(0.9));
        assert_eq!(parse_save_percentage("0.9"), Some(0.9));
        assert_eq!(parse_save_percentage("90%"), Some(0.9));
        assert_eq!(parse_save_percentage("-"), None);
        assert_eq!(computed_save_percentage(0, 0), 0.0);
        assert_eq!(computed_save_percentage(u32::MAX, 1), 1.0);
    }

    #[test]
    fn test_non_numeric_save_percentage_is_computed_instead() {
        for bad in ["NaN", "inf", "-infinity", "-0.5"] {
            assert_eq!(parse_save_percentage(bad), None, "{}", bad);
        }

        let html = Html::parse_document(
            r#"<table><tr><th>Name</th><th>GP</th><th>W</th><th>L</th><th>GA</th><th>SV</th><th>SV%</th></tr>
               <tr><td>Cy Park</td><td>4</td><td>2</td><td>2</td><td>10</td><td>90</td><td>NaN</td></tr></table>"#,
        );
        let stats = parse_stats(&html);
        assert!((stats.goalies[0].save_percentage - 0.9).abs() < 1e-9);

        let json = serde_json::to_string(&stats.goalies[0]).unwrap();
        let reloaded: GoalieStat = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, stats.goalies[0]);
    }
}
