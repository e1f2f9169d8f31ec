use std::collections::{BTreeMap, HashMap};

use crate::models::{Game, LeaderboardTier, Pick, RankedEntry, User};
use super::pick::score_pick;

#[derive(Debug, Clone)]
struct UserTotal {
    user: User,
    points: u32,
    tie_break: Option<u32>,
}

/// Sum each user's picks on the given games. A (user, game) pair is counted
/// once; duplicates keep the pick with the lowest id.
fn user_totals(games: &[Game], picks: &[Pick]) -> Vec<UserTotal> {
    let games_by_id: HashMap<i64, &Game> = games.iter().map(|g| (g.id, g)).collect();

    let mut unique: BTreeMap<(i64, i64), &Pick> = BTreeMap::new();
    for pick in picks.iter().filter(|p| games_by_id.contains_key(&p.game_id)) {
        unique
            .entry((pick.user.id, pick.game_id))
            .and_modify(|kept| {
                if pick.id < kept.id {
                    *kept = pick;
                }
            })
            .or_insert(pick);
    }

    let mut totals: BTreeMap<i64, UserTotal> = BTreeMap::new();
    for ((_, game_id), pick) in unique {
        let score = score_pick(pick, games_by_id[&game_id]);
        let total = totals.entry(pick.user.id).or_insert_with(|| UserTotal {
            user: pick.user.clone(),
            points: 0,
            tie_break: None,
        });
        total.points += score.points;
        if let Some(tb) = score.tie_break {
            total.tie_break = Some(total.tie_break.unwrap_or(0).saturating_add(tb));
        }
    }

    totals.into_values().collect()
}

fn by_name(a: &User, b: &User) -> std::cmp::Ordering {
    a.display_name.cmp(&b.display_name).then(a.id.cmp(&b.id))
}

/// Group users into tiers of equal point totals, highest first.
///
/// Users with equal totals share a tier; tie-breaks are not applied here.
pub fn evaluate(games: &[Game], picks: &[Pick]) -> Vec<LeaderboardTier> {
    let mut tiers: BTreeMap<u32, Vec<User>> = BTreeMap::new();
    for total in user_totals(games, picks) {
        tiers.entry(total.points).or_default().push(total.user);
    }

    tiers
        .into_iter()
        .rev()
        .map(|(points, mut users)| {
            users.sort_by(by_name);
            LeaderboardTier { points, users }
        })
        .collect()
}

/// Total order: points descending, then summed tie-break deviation ascending
/// (users with no decided game last). Equal points and deviation share a rank.
pub fn rank(games: &[Game], picks: &[Pick]) -> Vec<RankedEntry> {
    let mut totals = user_totals(games, picks);
    totals.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| match (a.tie_break, b.tie_break) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
            .then_with(|| by_name(&a.user, &b.user))
    });

    let mut entries: Vec<RankedEntry> = Vec::with_capacity(totals.len());
    for (i, total) in totals.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(prev) if prev.points == total.points && prev.tie_break == total.tie_break => prev.rank,
            _ => i + 1,
        };
        entries.push(RankedEntry {
            rank,
            user: total.user,
            points: total.points,
            tie_break: total.tie_break,
        });
    }
    entries
}
