use serde::{Deserialize, Serialize};

use crate::models::Game;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Outcome {
    Home,
    Visitor,
    Tie,
    Undetermined,
}

impl Outcome {
    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::Undetermined)
    }
}

/// Winner of a game. A final game missing either score is inconsistent feed
/// state and stays undetermined.
pub fn winner(game: &Game) -> Outcome {
    match game.final_scores() {
        None => Outcome::Undetermined,
        Some((home, visitor)) if home == visitor => Outcome::Tie,
        Some((home, visitor)) if home > visitor => Outcome::Home,
        Some(_) => Outcome::Visitor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn game(home: Option<u16>, visitor: Option<u16>, is_final: bool) -> Game {
        Game {
            id: 1,
            week_id: 1,
            year: 2019,
            week: 5,
            kickoff: Utc.with_ymd_and_hms(2019, 8, 8, 23, 0, 0).unwrap(),
            home_team_id: 3,
            visitor_team_id: 4,
            home_score: home,
            visitor_score: visitor,
            is_final,
        }
    }

    #[test]
    fn test_not_final_is_undetermined() {
        assert_eq!(winner(&game(None, None, false)), Outcome::Undetermined);
        // Scores during play do not decide anything
        assert_eq!(winner(&game(Some(21), Some(3), false)), Outcome::Undetermined);
    }

    #[test]
    fn test_final_outcomes() {
        assert_eq!(winner(&game(Some(23), Some(23), true)), Outcome::Tie);
        assert_eq!(winner(&game(Some(42), Some(23), true)), Outcome::Home);
        assert_eq!(winner(&game(Some(17), Some(23), true)), Outcome::Visitor);
    }

    #[test]
    fn test_swapping_scores_swaps_winner() {
        for (a, b) in [(0u16, 3u16), (23, 17), (10, 10), (35, 34)] {
            let forward = winner(&game(Some(a), Some(b), true));
            let reverse = winner(&game(Some(b), Some(a), true));
            let expected = match forward {
                Outcome::Home => Outcome::Visitor,
                Outcome::Visitor => Outcome::Home,
                other => other,
            };
            assert_eq!(reverse, expected);
            assert!(forward.is_decided());
        }
    }

    #[test]
    fn test_final_with_missing_score_is_undetermined() {
        assert_eq!(winner(&game(Some(7), None, true)), Outcome::Undetermined);
        assert_eq!(winner(&game(None, Some(7), true)), Outcome::Undetermined);
    }
}
