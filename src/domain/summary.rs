use serde::{Deserialize, Serialize};

/// How far the tracked club got in a season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonResult {
    Champions,
    /// Inferred from a winning record, not from an actual playoff berth
    Playoffs,
    #[serde(rename = "Regular Season")]
    RegularSeason,
}

/// The tracked club's record for one season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubSeasonSummary {
    pub season_key: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub result: SeasonResult,
    pub champion: bool,
}

/// Every season summary added together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllTimeSummary {
    pub seasons: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub titles: u32,
}

impl AllTimeSummary {
    pub fn add(&mut self, season: &ClubSeasonSummary) {
        self.seasons += 1;
        self.wins += season.wins;
        self.losses += season.losses;
        self.ties += season.ties;
        self.goals_for += season.goals_for;
        self.goals_against += season.goals_against;
        if season.champion {
            self.titles += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_result_labels() {
        let json = serde_json::to_string(&[
            SeasonResult::Champions,
            SeasonResult::Playoffs,
            SeasonResult::RegularSeason,
        ])
        .unwrap();
        assert_eq!(json, r#"["Champions","Playoffs","Regular Season"]"#);
    }
}
