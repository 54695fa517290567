use log::warn;
use serde_json::Value;

use crate::api::models::RawGame;
use crate::domain::Game;

/// Games decoded from one schedule response
#[derive(Debug, Default)]
pub struct DecodedSchedule {
    pub games: Vec<Game>,
    /// Records dropped because they failed validation
    pub skipped: usize,
}

/// Decode every API record, skipping (and counting) the invalid ones
pub fn decode_schedule(records: Vec<Value>, club: &str) -> DecodedSchedule {
    let mut decoded = DecodedSchedule::default();

    for (index, record) in records.into_iter().enumerate() {
        let game = serde_json::from_value::<RawGame>(record)
            .map_err(anyhow::Error::from)
            .and_then(|raw| raw.into_game(club));

        match game {
            Ok(game) => decoded.games.push(game),
            Err(e) => {
                warn!("Skipping schedule record #{}: {}", index, e);
                decoded.skipped += 1;
            }
        }
    }

    if decoded.skipped > 0 {
        warn!("Skipped {} invalid schedule records", decoded.skipped);
    }

    decoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_records_are_skipped_and_counted() {
        let records = vec![
            json!({"id": 1, "gamedate": "2026-01-04", "awayteam": "A", "awayscore": 2, "hometeam": "B", "homescore": 1}),
            json!({"id": 2, "awayteam": "A", "hometeam": "B"}),
            json!({"id": 3, "gamedate": "2026-01-11", "awayteam": "A", "awayscore": "x", "hometeam": "B"}),
            json!("not a game"),
            json!({"id": 5, "gamedate": "2026-01-18", "awayteam": "B", "awayscore": "", "hometeam": "A", "homescore": ""}),
        ];

        let decoded = decode_schedule(records, "Ice Dogs");

        assert_eq!(decoded.skipped, 3);
        assert_eq!(decoded.games.len(), 2);
        assert_eq!(decoded.games[0].id, "1");
        assert_eq!(decoded.games[1].id, "5");
        assert!(!decoded.games[1].is_completed());
    }
}
