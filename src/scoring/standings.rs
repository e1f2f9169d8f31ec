use std::cmp::Ordering;
use std::collections::HashMap;

use crate::calendar::SeasonWindow;
use crate::models::{Game, Team, TeamRecord};

/// Won/lost/tied and points for every non-placeholder team over the window.
///
/// All games are scanned once. Points for and against only accumulate over
/// games the team won.
pub fn team_records(teams: &[Team], games: &[Game], window: &SeasonWindow) -> Vec<TeamRecord> {
    if window.is_off() {
        return Vec::new();
    }

    let mut records: HashMap<i64, TeamRecord> = teams
        .iter()
        .filter(|t| !t.is_placeholder())
        .map(|t| (t.id, TeamRecord::empty(t.clone())))
        .collect();

    for game in games.iter().filter(|g| window.contains(g)) {
        for team_id in [game.home_team_id, game.visitor_team_id] {
            let Some((own, opponent)) = game.score_for(team_id) else {
                continue;
            };
            let Some(record) = records.get_mut(&team_id) else {
                continue;
            };
            match own.cmp(&opponent) {
                Ordering::Greater => {
                    record.won += 1;
                    record.points_for += own as u32;
                    record.points_against += opponent as u32;
                }
                Ordering::Less => record.lost += 1,
                Ordering::Equal => record.tied += 1,
            }
        }
    }

    let mut records: Vec<TeamRecord> = records
        .into_values()
        .map(|mut record| {
            record.points_diff = record.points_for as i64 - record.points_against as i64;
            record.won_lost_ratio = won_lost_ratio(record.won, record.lost);
            record
        })
        .collect();
    records.sort_by(|a, b| a.team.code.cmp(&b.team.code));
    records
}

/// `1 - lost / (won + lost)`, or 0 before any decision.
pub fn won_lost_ratio(won: u32, lost: u32) -> f64 {
    if won + lost == 0 {
        return 0.0;
    }
    1.0 - lost as f64 / (won + lost) as f64
}

/// Standings order: `(won, tied, lost)` descending, abbreviation as final key.
pub fn sort_standings(records: &mut [TeamRecord]) {
    records.sort_by(|a, b| {
        (b.won, b.tied, b.lost)
            .cmp(&(a.won, a.tied, a.lost))
            .then_with(|| a.team.code.abbr().cmp(b.team.code.abbr()))
    });
}

/// Points order: differential descending, abbreviation as final key.
pub fn sort_by_points(records: &mut [TeamRecord]) {
    records.sort_by(|a, b| {
        b.points_diff
            .cmp(&a.points_diff)
            .then_with(|| a.team.code.abbr().cmp(b.team.code.abbr()))
    });
}
