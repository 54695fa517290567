use anyhow::Result;
use log::info;
use scraper::Html;

use super::pages::PageFetcher;
use crate::domain::{RosterPlayer, SeasonKey};
use crate::html::extract::{captaincy_from_cell, cell_text, team_from_logo};
use crate::html::{LocatedTable, TableSignature, find_tables};

const ROSTER_TABLE: TableSignature<'static> = TableSignature::new(&["Position", "Height"]);
const MIN_CELLS: usize = 7;

/// Scraper for the rosters page (one table per team)
pub struct RosterScraper {
    pages: PageFetcher,
}

impl RosterScraper {
    pub fn new(pages: PageFetcher) -> Self {
        Self { pages }
    }

    pub async fn fetch_rosters(&self, key: &SeasonKey) -> Result<Vec<RosterPlayer>> {
        let body = self.pages.fetch_page(key, "rosters").await?;
        let roster = parse_rosters(&Html::parse_document(&body));
        info!("  {}: {} roster entries", key, roster.len());
        Ok(roster)
    }
}

pub fn parse_rosters(document: &Html) -> Vec<RosterPlayer> {
    find_tables(document, &ROSTER_TABLE)
        .flat_map(|table| parse_roster_table(&table))
        .collect()
}

fn parse_roster_table(table: &LocatedTable<'_>) -> Vec<RosterPlayer> {
    let team = team_from_logo(table.element);

    // Positional layout: #, name, position, height, weight, shoots, hometown
    let number = table.column(&["#", "No", "No.", "Number"]).unwrap_or(0);
    let name = table.column(&["Name", "Player"]).unwrap_or(1);
    let position = table.column(&["Position", "Pos"]).unwrap_or(2);
    let height = table.column(&["Height", "Ht"]).unwrap_or(3);
    let weight = table.column(&["Weight", "Wt"]).unwrap_or(4);
    let shoots = table.column(&["Shoots", "Catches", "S/C"]).unwrap_or(5);
    let hometown = table.column(&["Hometown", "Home Town", "From"]).unwrap_or(6);

    table
        .row_cells()
        .filter(|cells| cells.len() >= MIN_CELLS)
        .filter_map(|cells| {
            let captaincy = captaincy_from_cell(*cells.get(name)?);
            if captaincy.name.is_empty() {
                return None;
            }
            let text = |index: usize| cells.get(index).map(|cell| cell_text(*cell)).unwrap_or_default();

            Some(RosterPlayer {
                name: captaincy.name,
                number: text(number).trim_start_matches('#').to_string(),
                position: text(position),
                height: text(height),
                weight: text(weight),
                shoots: text(shoots),
                hometown: text(hometown),
                team: team.clone(),
                is_captain: captaincy.is_captain,
                is_assistant: captaincy.is_assistant,
            })
        })
        .collect()
}
