use log::warn;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{Game, Standing};

const POINTS_PER_WIN: u32 = 2;
const POINTS_PER_TIE: u32 = 1;

/// Standings derived from completed games; games missing either score are ignored
pub fn standings_from_games(games: &[Game]) -> Vec<Standing> {
    let mut table: BTreeMap<&str, Standing> = BTreeMap::new();

    for game in games {
        let Some((away_goals, home_goals)) = game.final_score() else {
            continue;
        };

        record_result(&mut table, &game.away_team, away_goals, home_goals);
        record_result(&mut table, &game.home_team, home_goals, away_goals);
    }

    let mut standings: Vec<Standing> = table.into_values().collect();
    sort_standings(&mut standings);
    standings
}

fn record_result<'a>(table: &mut BTreeMap<&'a str, Standing>, team: &'a str, scored: u32, conceded: u32) {
    let row = table.entry(team).or_insert_with(|| Standing::new(team));
    row.games_played += 1;
    row.goals_for += scored;
    row.goals_against += conceded;

    match scored.cmp(&conceded) {
        Ordering::Greater => {
            row.wins += 1;
            row.points += POINTS_PER_WIN;
        }
        Ordering::Less => row.losses += 1,
        Ordering::Equal => {
            row.ties += 1;
            row.points += POINTS_PER_TIE;
        }
    }
}

/// Points descending, then goal differential descending. Stable, so rows
/// level on both keep their existing order.
pub fn sort_standings(standings: &mut [Standing]) {
    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_differential().cmp(&a.goal_differential()))
    });
}

/// Compares a scraped standings table with the one derived from games and
/// returns a description of every disagreement
pub fn cross_check(scraped: &[Standing], derived: &[Standing]) -> Vec<String> {
    let mut mismatches = Vec::new();

    for row in scraped {
        match derived.iter().find(|d| d.team == row.team) {
            None if row.games_played > 0 => {
                mismatches.push(format!("{}: no completed games in schedule", row.team))
            }
            None => {}
            Some(d) => {
                let scraped_record = (row.wins, row.losses, row.ties, row.points);
                let derived_record = (d.wins, d.losses, d.ties, d.points);
                if scraped_record != derived_record {
                    mismatches.push(format!(
                        "{}: table says {}-{}-{} ({} pts), schedule says {}-{}-{} ({} pts)",
                        row.team, row.wins, row.losses, row.ties, row.points, d.wins, d.losses, d.ties, d.points
                    ));
                }
            }
        }
    }

    mismatches
}

/// Fills in standings from games when the page had no table, and otherwise
/// checks the published table against the schedule
pub fn reconcile_standings(scraped: Vec<Standing>, games: &[Game], label: &str) -> Vec<Standing> {
    let derived = standings_from_games(games);
    if scraped.is_empty() {
        return derived;
    }

    for mismatch in cross_check(&scraped, &derived) {
        warn!("{} standings differ from schedule: {}", label, mismatch);
    }
    scraped
}
