use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One of the three league seasons played each calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Winter, Season::Spring, Season::Summer];

    /// Season in play during the given month (1 = January)
    pub fn for_month(month: u32) -> Self {
        match month {
            1..=3 => Season::Winter,
            4..=6 => Season::Spring,
            _ => Season::Summer,
        }
    }

    pub fn current(today: NaiveDate) -> Self {
        Self::for_month(today.month())
    }

    /// Lowercase form used in URLs, API parameters and snapshot keys
    pub fn slug(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
        }
    }

    /// Finds the first season name mentioned in free text
    pub fn mentioned_in(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        Self::ALL
            .into_iter()
            .filter_map(|season| lower.find(season.slug()).map(|pos| (pos, season)))
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, season)| season)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Season {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            other => anyhow::bail!("Unknown season: {}", other),
        }
    }
}

/// Snapshot key of one season: `winter` for the live season, `winter-2024` for an archived one
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeasonKey {
    pub season: Season,
    pub year: Option<i32>,
}

impl SeasonKey {
    pub fn current(season: Season) -> Self {
        Self { season, year: None }
    }

    pub fn archived(season: Season, year: i32) -> Self {
        Self {
            season,
            year: Some(year),
        }
    }
}

impl fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{}-{}", self.season.slug(), year),
            None => f.write_str(self.season.slug()),
        }
    }
}

impl FromStr for SeasonKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('-') {
            Some((season, year)) => {
                let year = year
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid year in season key: {}", s))?;
                Ok(Self::archived(season.parse()?, year))
            }
            None => Ok(Self::current(s.parse()?)),
        }
    }
}
