use serde::{Deserialize, Serialize};

use super::{Team, User};

/// Users sharing the same point total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardTier {
    pub points: u32,
    pub users: Vec<User>,
}

/// One user's position when ties are broken by tie-break deviation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedEntry {
    pub rank: usize,
    pub user: User,
    pub points: u32,
    /// Summed deviation over decided games; `None` when nothing was decided.
    pub tie_break: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamRecord {
    pub team: Team,
    pub won: u32,
    pub lost: u32,
    pub tied: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub points_diff: i64,
    pub won_lost_ratio: f64,
}

impl TeamRecord {
    pub fn empty(team: Team) -> Self {
        Self {
            team,
            won: 0,
            lost: 0,
            tied: 0,
            points_for: 0,
            points_against: 0,
            points_diff: 0,
            won_lost_ratio: 0.0,
        }
    }

    pub fn games_played(&self) -> u32 {
        self.won + self.lost + self.tied
    }
}
