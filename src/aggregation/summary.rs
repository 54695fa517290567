use crate::domain::{
    AllTimeSummary, Championship, ClubSeasonSummary, SeasonData, SeasonKey, SeasonResult, Standing, mentions_club,
};

use super::standings::standings_from_games;

/// Whether the club won the title of the season stored under `key`.
///
/// The season must match. An archived key must also match on year; a live
/// key uses the year of its latest game when it has one.
///
/// The champion is matched with [`mentions_club`], a substring test: a title
/// won by a team whose name contains the club's name (say "Ice Dogs Juniors"
/// for "Ice Dogs") is credited to the club. Telling such teams apart needs a
/// canonical team id, which neither the archive nor the schedule provides.
pub fn is_champion(key: &SeasonKey, data: &SeasonData, championships: &[Championship], club: &str) -> bool {
    let year = key.year.or_else(|| data.latest_game_year());

    championships.iter().any(|title| {
        title.season == key.season
            && year.is_none_or(|year| title.year == year)
            && mentions_club(&title.champion, club)
    })
}

/// The club's record for one season, or `None` when it has no standings row
pub fn club_season_summary(
    key: &SeasonKey,
    data: &SeasonData,
    championships: &[Championship],
    club: &str,
) -> Option<ClubSeasonSummary> {
    let derived;
    let standings: &[Standing] = if data.standings.is_empty() {
        derived = standings_from_games(&data.games);
        &derived
    } else {
        &data.standings
    };

    let row = standings.iter().find(|row| mentions_club(&row.team, club))?;
    let champion = is_champion(key, data, championships, club);

    Some(ClubSeasonSummary {
        season_key: key.to_string(),
        wins: row.wins,
        losses: row.losses,
        ties: row.ties,
        goals_for: row.goals_for,
        goals_against: row.goals_against,
        result: classify(row, champion),
        champion,
    })
}

/// A title always wins; otherwise a winning record is read as a playoff season
fn classify(row: &Standing, champion: bool) -> SeasonResult {
    if champion {
        SeasonResult::Champions
    } else if row.wins > row.losses {
        SeasonResult::Playoffs
    } else {
        SeasonResult::RegularSeason
    }
}

pub fn all_time_summary(seasons: &[ClubSeasonSummary]) -> AllTimeSummary {
    let mut summary = AllTimeSummary::default();
    for season in seasons {
        summary.add(season);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Season;

    const CLUB: &str = "Ice Dogs";

    fn season_with(wins: u32, losses: u32) -> SeasonData {
        SeasonData {
            standings: vec![
                Standing {
                    team: "Polar Bears".into(),
                    wins: 5,
                    ..Standing::default()
                },
                Standing {
                    team: "Ice Dogs".into(),
                    games_played: wins + losses,
                    wins,
                    losses,
                    points: wins * 2,
                    goals_for: 30,
                    goals_against: 20,
                    ..Standing::default()
                },
            ],
            ..SeasonData::default()
        }
    }

    fn title(year: i32, season: Season, champion: &str) -> Championship {
        Championship {
            year,
            season,
            division: "Open".into(),
            champion: champion.into(),
        }
    }

    #[test]
    fn test_winning_record_without_title_is_playoffs() {
        let key = SeasonKey::archived(Season::Winter, 2024);
        let titles = vec![title(2024, Season::Winter, "Polar Bears"), title(2023, Season::Winter, CLUB)];

        let summary = club_season_summary(&key, &season_with(7, 3), &titles, CLUB).unwrap();

        assert_eq!(summary.result, SeasonResult::Playoffs);
        assert!(!summary.champion);
        assert_eq!(summary.season_key, "winter-2024");
        assert_eq!((summary.wins, summary.losses, summary.goals_for), (7, 3, 30));
    }

    #[test]
    fn test_title_overrides_losing_record() {
        let key = SeasonKey::archived(Season::Spring, 2024);
        let titles = vec![title(2024, Season::Spring, "Ice Dogs (A)")];

        let summary = club_season_summary(&key, &season_with(2, 8), &titles, CLUB).unwrap();

        assert_eq!(summary.result, SeasonResult::Champions);
        assert!(summary.champion);
    }

    #[test]
    fn test_losing_record_is_regular_season() {
        let key = SeasonKey::current(Season::Summer);
        let summary = club_season_summary(&key, &season_with(4, 4), &[], CLUB).unwrap();
        assert_eq!(summary.result, SeasonResult::RegularSeason);
    }

    #[test]
    fn test_live_season_without_games_matches_on_season_only() {
        let key = SeasonKey::current(Season::Summer);
        let titles = vec![title(2025, Season::Summer, CLUB)];

        assert!(is_champion(&key, &season_with(1, 0), &titles, CLUB));
        assert!(!is_champion(&SeasonKey::current(Season::Winter), &season_with(1, 0), &titles, CLUB));
    }

    #[test]
    fn test_title_of_team_containing_club_name_is_credited() {
        let key = SeasonKey::archived(Season::Winter, 2024);
        let titles = vec![title(2024, Season::Winter, "Ice Dogs Juniors")];

        assert!(is_champion(&key, &season_with(3, 3), &titles, CLUB));
        assert!(!is_champion(&key, &season_with(3, 3), &titles, "Ice Dogs Seniors"));
    }

    #[test]
    fn test_club_missing_from_standings_has_no_summary() {
        let data = SeasonData {
            standings: vec![Standing::new("Polar Bears")],
            ..SeasonData::default()
        };
        assert!(club_season_summary(&SeasonKey::current(Season::Winter), &data, &[], CLUB).is_none());
    }

    #[test]
    fn test_all_time_rollup() {
        let key = SeasonKey::archived(Season::Winter, 2024);
        let titles = vec![title(2024, Season::Winter, CLUB)];
        let seasons = vec![
            club_season_summary(&key, &season_with(7, 3), &titles, CLUB).unwrap(),
            club_season_summary(&SeasonKey::archived(Season::Spring, 2024), &season_with(2, 5), &titles, CLUB)
                .unwrap(),
        ];

        let summary = all_time_summary(&seasons);

        assert_eq!(summary.seasons, 2);
        assert_eq!((summary.wins, summary.losses), (9, 8));
        assert_eq!((summary.goals_for, summary.goals_against), (60, 40));
        assert_eq!(summary.titles, 1);
    }
}
