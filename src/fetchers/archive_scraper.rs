use anyhow::Result;
use log::{debug, info, warn};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

use super::pages::PageFetcher;
use crate::domain::{Championship, Season, SeasonKey};
use crate::html::extract::{block_text, cell_text, collapse_whitespace};

pub const DEFAULT_DIVISION: &str = "Open";

static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").expect("heading selector"));
static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{4})\s*[-–—:|]\s*(.+?)\s*$").expect("title line regex"));
static DIVISION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(([^)]*\bdiv(?:ision)?\b[^)]*)\)").expect("division regex"));
static SEASON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(winter|spring|summer)\b").expect("season word regex"));

/// Scraper for the championship archive
pub struct ArchiveScraper {
    pages: PageFetcher,
}

impl ArchiveScraper {
    pub fn new(pages: PageFetcher) -> Self {
        Self { pages }
    }

    /// Every championship listed on the archive page. The site publishes one
    /// combined archive, found under the winter season.
    pub async fn fetch_championships(&self) -> Result<Vec<Championship>> {
        let key = SeasonKey::current(Season::Winter);
        let body = self.pages.fetch_page(&key, "archives").await?;
        let championships = parse_championships(&Html::parse_document(&body));
        info!("  → Found {} championships", championships.len());
        Ok(championships)
    }
}

/// Championships under season headings, or from the whole page text when the
/// headings yield nothing
pub fn parse_championships(document: &Html) -> Vec<Championship> {
    let mut championships = from_headings(document);
    if championships.is_empty() {
        debug!("No championships under season headings, scanning page text");
        championships = from_page_text(document);
    }
    if championships.is_empty() {
        warn!("No championships found on archive page");
    }

    finalize(championships)
}

// --- Primary strategy: season headings ---

fn from_headings(document: &Html) -> Vec<Championship> {
    let mut championships = Vec::new();

    for heading in document.select(&HEADING) {
        let Some(season) = Season::mentioned_in(&cell_text(heading)) else {
            continue;
        };

        for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
            if is_heading(sibling) {
                break;
            }
            championships.extend(
                block_text(sibling)
                    .lines()
                    .filter_map(|line| parse_title_line(line, season)),
            );
        }
    }

    championships
}

fn is_heading(element: ElementRef<'_>) -> bool {
    matches!(element.value().name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

// --- Fallback strategy: page text split at season names ---

fn from_page_text(document: &Html) -> Vec<Championship> {
    let text = block_text(document.root_element());
    let markers: Vec<(usize, usize, Season)> = SEASON_WORD
        .find_iter(&text)
        .filter_map(|m| Some((m.start(), m.end(), m.as_str().parse().ok()?)))
        .collect();

    markers
        .iter()
        .enumerate()
        .flat_map(|(index, (_, end, season))| {
            let section_end = markers.get(index + 1).map_or(text.len(), |next| next.0);
            text[*end..section_end]
                .lines()
                .filter_map(|line| parse_title_line(line, *season))
                .collect::<Vec<_>>()
        })
        .collect()
}

// --- Line parsing ---

/// Parses `<year><separator><team>`, with an optional `(… Division)` qualifier
pub fn parse_title_line(line: &str, season: Season) -> Option<Championship> {
    let captures = TITLE_LINE.captures(line)?;
    let year: i32 = captures[1].parse().ok()?;
    if !(1950..=2100).contains(&year) {
        return None;
    }

    let raw_team = &captures[2];
    let division = DIVISION
        .captures(raw_team)
        .map(|c| collapse_whitespace(&c[1]))
        .unwrap_or_else(|| DEFAULT_DIVISION.to_string());
    let champion = collapse_whitespace(&DIVISION.replace_all(raw_team, " "));

    if !champion.chars().any(char::is_alphabetic) {
        return None;
    }

    Some(Championship {
        year,
        season,
        division,
        champion,
    })
}

/// Drops repeated (year, season, division) entries and orders newest first
fn finalize(championships: Vec<Championship>) -> Vec<Championship> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Championship> = championships
        .into_iter()
        .filter(|c| seen.insert((c.year, c.season, c.division.to_lowercase())))
        .collect();

    unique.sort_by(|a, b| b.year.cmp(&a.year).then(a.season.cmp(&b.season)));
    unique
}
