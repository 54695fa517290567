use anyhow::Result;
use log::warn;
use serde::Deserialize;

use crate::domain::{Game, GameType, Score, mentions_club};
use crate::html::extract::{collapse_whitespace, normalize_date};

/// One record of the schedule API, before validation
#[derive(Debug, Deserialize)]
pub struct RawGame {
    pub id: RawValue,
    pub gamedate: String,
    #[serde(default)]
    pub gametime: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    pub awayteam: String,
    #[serde(default)]
    pub awayscore: Option<RawValue>,
    pub hometeam: String,
    #[serde(default)]
    pub homescore: Option<RawValue>,
    #[serde(default)]
    pub gametype: Option<RawValue>,
    #[serde(default)]
    pub typename: Option<String>,
}

/// A field the API sends either as a number or as a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(i64),
    Text(String),
}

impl RawValue {
    fn as_id(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => s.trim().to_string(),
        }
    }

    fn as_code(&self) -> i64 {
        match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

/// Resolves a score that may be a number, `null`, absent or a string
pub fn resolve_score(raw: Option<&RawValue>) -> Result<Score> {
    match raw {
        None => Ok(Score::Unknown),
        Some(RawValue::Number(n)) => match u32::try_from(*n) {
            Ok(goals) => Ok(Score::Known(goals)),
            Err(_) => anyhow::bail!("Score out of range: {}", n),
        },
        Some(RawValue::Text(s)) if s.trim().is_empty() => Ok(Score::Unknown),
        Some(RawValue::Text(s)) => match s.trim().parse::<u32>() {
            Ok(goals) => Ok(Score::Known(goals)),
            Err(_) => anyhow::bail!("Score is not a number: {:?}", s),
        },
    }
}

impl RawGame {
    /// Validates the record and maps it onto a canonical game
    pub fn into_game(self, club: &str) -> Result<Game> {
        let away_score = resolve_score(self.awayscore.as_ref())?;
        let home_score = resolve_score(self.homescore.as_ref())?;
        let id = self.id.as_id();

        let date = normalize_date(&self.gamedate).unwrap_or_else(|| {
            warn!("Game {}: unrecognized date {:?}, keeping it as-is", id, self.gamedate);
            self.gamedate.trim().to_string()
        });

        let away_team = collapse_whitespace(&self.awayteam);
        let home_team = collapse_whitespace(&self.hometeam);
        let is_home = mentions_club(&home_team, club);
        let is_club_game = is_home || mentions_club(&away_team, club);

        Ok(Game {
            id,
            date,
            time: self.gametime.unwrap_or_default().trim().to_string(),
            venue: self.field.unwrap_or_default().trim().to_string(),
            away_team,
            home_team,
            away_score,
            home_score,
            game_type: GameType::from_code(self.gametype.as_ref().map_or(0, RawValue::as_code)),
            type_name: self.typename.unwrap_or_default().trim().to_string(),
            is_club_game,
            is_home,
        })
    }
}
