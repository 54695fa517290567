use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::season::Season;
use super::summary::{AllTimeSummary, ClubSeasonSummary};

/// Whether a team name refers to the tracked club. Substring match, so a club
/// whose name is contained in another team's name also matches that team.
pub fn mentions_club(team: &str, club: &str) -> bool {
    let club = club.trim().to_lowercase();
    !club.is_empty() && team.to_lowercase().contains(&club)
}

/// Score of one side of a game, resolved once when the upstream record is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum Score {
    Known(u32),
    Unknown,
}

impl Score {
    pub fn value(&self) -> Option<u32> {
        match self {
            Score::Known(goals) => Some(*goals),
            Score::Unknown => None,
        }
    }
}

impl From<Option<u32>> for Score {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Score::Unknown, Score::Known)
    }
}

impl From<Score> for Option<u32> {
    fn from(score: Score) -> Self {
        score.value()
    }
}

/// Classification of a game derived from the upstream integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Regular,
    Playoff,
    Championship,
}

impl GameType {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => GameType::Playoff,
            2 => GameType::Championship,
            _ => GameType::Regular,
        }
    }
}

/// One scheduled or completed game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    /// Always `YYYY-MM-DD` when the upstream date could be parsed
    pub date: String,
    pub time: String,
    pub venue: String,
    pub away_team: String,
    pub home_team: String,
    pub away_score: Score,
    pub home_score: Score,
    pub game_type: GameType,
    #[serde(default)]
    pub type_name: String,
    pub is_club_game: bool,
    pub is_home: bool,
}

impl Game {
    /// Both scores, only once the game has been played
    pub fn final_score(&self) -> Option<(u32, u32)> {
        Some((self.away_score.value()?, self.home_score.value()?))
    }

    pub fn is_completed(&self) -> bool {
        self.final_score().is_some()
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// One team's record within a season
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub team: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl Standing {
    pub fn new(team: &str) -> Self {
        Self {
            team: team.to_string(),
            ..Self::default()
        }
    }

    pub fn goal_differential(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStat {
    pub name: String,
    pub number: String,
    /// Empty when no team logo precedes the stats table
    pub team: String,
    pub games_played: u32,
    pub goals: u32,
    pub assists: u32,
    pub points: u32,
    pub penalty_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalieStat {
    pub name: String,
    pub number: String,
    pub team: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub goals_against: u32,
    pub saves: u32,
    pub save_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPlayer {
    pub name: String,
    pub number: String,
    pub position: String,
    pub height: String,
    pub weight: String,
    pub shoots: String,
    pub hometown: String,
    pub team: String,
    pub is_captain: bool,
    pub is_assistant: bool,
}

/// A title won at the end of a league season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Championship {
    pub year: i32,
    pub season: Season,
    pub division: String,
    pub champion: String,
}

/// Everything fetched for one season
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonData {
    pub games: Vec<Game>,
    pub standings: Vec<Standing>,
    pub player_stats: Vec<PlayerStat>,
    pub goalie_stats: Vec<GoalieStat>,
    pub roster: Vec<RosterPlayer>,
}

impl SeasonData {
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
            && self.standings.is_empty()
            && self.player_stats.is_empty()
            && self.goalie_stats.is_empty()
            && self.roster.is_empty()
    }

    /// Calendar year of the latest dated game
    pub fn latest_game_year(&self) -> Option<i32> {
        use chrono::Datelike;

        self.games
            .iter()
            .filter_map(Game::calendar_date)
            .max()
            .map(|date| date.year())
    }
}

/// The persisted artifact consumed by the site generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub current_season: Season,
    pub current_year: i32,
    pub seasons: BTreeMap<String, SeasonData>,
    pub championships: Vec<Championship>,
    pub club_summary: AllTimeSummary,
    pub season_summaries: Vec<ClubSeasonSummary>,
    pub fetched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_serializes_as_number_or_null() {
        let json = serde_json::to_string(&[Score::Known(4), Score::Unknown]).unwrap();
        assert_eq!(json, "[4,null]");

        let parsed: Vec<Score> = serde_json::from_str("[0,null]").unwrap();
        assert_eq!(parsed, vec![Score::Known(0), Score::Unknown]);
    }

    #[test]
    fn test_mentions_club_is_case_insensitive_substring() {
        assert!(mentions_club("ICE DOGS", "Ice Dogs"));
        assert!(mentions_club("Ice Dogs Juniors", "Ice Dogs"));
        assert!(!mentions_club("Polar Bears", "Ice Dogs"));
        assert!(!mentions_club("Polar Bears", " "));
    }

    #[test]
    fn test_game_type_from_code() {
        assert_eq!(GameType::from_code(0), GameType::Regular);
        assert_eq!(GameType::from_code(1), GameType::Playoff);
        assert_eq!(GameType::from_code(2), GameType::Championship);
        assert_eq!(GameType::from_code(7), GameType::Regular);
        assert_eq!(GameType::from_code(-1), GameType::Regular);
    }

    #[test]
    fn test_latest_game_year_ignores_unparsed_dates() {
        let game = |date: &str| Game {
            id: date.to_string(),
            date: date.to_string(),
            time: String::new(),
            venue: String::new(),
            away_team: "A".to_string(),
            home_team: "B".to_string(),
            away_score: Score::Unknown,
            home_score: Score::Unknown,
            game_type: GameType::Regular,
            type_name: String::new(),
            is_club_game: false,
            is_home: false,
        };

        let data = SeasonData {
            games: vec![game("2025-12-30"), game("2026-01-11"), game("TBD")],
            ..SeasonData::default()
        };

        assert_eq!(data.latest_game_year(), Some(2026));
        assert_eq!(SeasonData::default().latest_game_year(), None);
    }
}
