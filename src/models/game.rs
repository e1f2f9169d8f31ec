use serde::{Deserialize, Serialize};
use chrono::{DateTime, Datelike, FixedOffset, Utc, Weekday};

use crate::scoring::outcome::{self, Outcome};

/// Offset the feed uses for the Monday night check (US Eastern, no DST).
const EASTERN_STANDARD_OFFSET_SECS: i32 = 5 * 3600;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub id: i64,
    pub week_id: i64,
    pub year: i32,
    pub week: u16,
    pub kickoff: DateTime<Utc>,
    pub home_team_id: i64,
    pub visitor_team_id: i64,
    #[serde(default)]
    pub home_score: Option<u16>,
    #[serde(default)]
    pub visitor_score: Option<u16>,
    #[serde(default)]
    pub is_final: bool,
}

impl Game {
    pub fn winner(&self) -> Outcome {
        outcome::winner(self)
    }

    /// Both scores, but only once the game is final.
    pub fn final_scores(&self) -> Option<(u16, u16)> {
        if !self.is_final {
            return None;
        }
        Some((self.home_score?, self.visitor_score?))
    }

    pub fn involves(&self, team_id: i64) -> bool {
        self.home_team_id == team_id || self.visitor_team_id == team_id
    }

    /// `(own, opponent)` final score from `team_id`'s side.
    pub fn score_for(&self, team_id: i64) -> Option<(u16, u16)> {
        let (home, visitor) = self.final_scores()?;
        if self.home_team_id == team_id {
            Some((home, visitor))
        } else if self.visitor_team_id == team_id {
            Some((visitor, home))
        } else {
            None
        }
    }

    pub fn has_started(&self, at: DateTime<Utc>) -> bool {
        self.kickoff <= at
    }

    pub fn is_monday_night(&self) -> bool {
        FixedOffset::west_opt(EASTERN_STANDARD_OFFSET_SECS)
            .map(|eastern| self.kickoff.with_timezone(&eastern).weekday() == Weekday::Mon)
            .unwrap_or(false)
    }
}
