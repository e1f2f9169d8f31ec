use serde::{Deserialize, Serialize};

use crate::models::{Game, Pick};
use super::outcome::Outcome;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PickScore {
    pub points: u32,
    pub tie_break: Option<u32>,
}

/// 1 for a selection matching the winner, otherwise 0.
pub fn awarded_points(pick: &Pick, game: &Game) -> u32 {
    if pick.selection.matches(game.winner()) {
        1
    } else {
        0
    }
}

/// Distance between the pick's margin guess and the real margin of victory.
///
/// A wrong side is penalized with the winner's score on top of the guess so it
/// always ranks behind a correct side. A tied game has no penalty branch and
/// returns the guess unchanged.
pub fn tie_break(pick: &Pick, game: &Game) -> Option<u32> {
    let winner = game.winner();
    let (home, visitor) = match winner {
        Outcome::Undetermined => return None,
        _ => game.final_scores()?,
    };

    let guess = pick.picked_tie_break;
    if pick.selection.matches(winner) {
        let margin = (home as i64 - visitor as i64).unsigned_abs() as u32;
        return Some(margin.abs_diff(guess));
    }

    Some(match winner {
        Outcome::Home => (home as u32).saturating_add(guess),
        Outcome::Visitor => (visitor as u32).saturating_add(guess),
        _ => guess,
    })
}

pub fn score_pick(pick: &Pick, game: &Game) -> PickScore {
    PickScore {
        points: awarded_points(pick, game),
        tie_break: tie_break(pick, game),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Selection, User};
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

    fn pick(selection: Selection, picked_tie_break: u32) -> Pick {
        Pick {
            id: 1,
            user: User::new(1, "Name 1"),
            game_id: 1,
            selection,
            picked_tie_break,
        }
    }

    #[test]
    fn test_home_win_exact_margin() {
        let g = game(Some(23), Some(17), true);
        let p = pick(Selection::Home, 6);
        assert_eq!(score_pick(&p, &g), PickScore { points: 1, tie_break: Some(0) });
    }

    #[test]
    fn test_wrong_side_penalized_with_winner_score() {
        let g = game(Some(23), Some(27), true);
        let p = pick(Selection::Home, 23);
        assert_eq!(awarded_points(&p, &g), 0);
        assert_eq!(tie_break(&p, &g), Some(27 + 23));

        let g = game(Some(30), Some(3), true);
        let p = pick(Selection::Visitor, 4);
        assert_eq!(tie_break(&p, &g), Some(34));
    }

    #[test]
    fn test_huge_guess_on_wrong_side_saturates() {
        let g = game(Some(20), Some(10), true);
        let p = pick(Selection::Visitor, u32::MAX);
        assert_eq!(tie_break(&p, &g), Some(u32::MAX));

        // A correct side cannot overflow, the deviation is a plain distance
        assert_eq!(tie_break(&pick(Selection::Home, u32::MAX), &g), Some(u32::MAX - 10));
    }

    #[test]
    fn test_correct_side_deviation_is_absolute() {
        let g = game(Some(28), Some(23), true);
        assert_eq!(tie_break(&pick(Selection::Home, 2), &g), Some(3));
        assert_eq!(tie_break(&pick(Selection::Home, 9), &g), Some(4));
    }

    #[test]
    fn test_tied_game_returns_guess_unpenalized() {
        let g = game(Some(20), Some(20), true);
        assert_eq!(tie_break(&pick(Selection::Home, 7), &g), Some(7));
        assert_eq!(tie_break(&pick(Selection::Tie, 7), &g), Some(7));
        assert_eq!(awarded_points(&pick(Selection::Tie, 7), &g), 1);
    }

    #[test]
    fn test_undecided_game_scores_nothing() {
        let g = game(None, None, false);
        for selection in [Selection::NotPicked, Selection::Home, Selection::Visitor, Selection::Tie] {
            assert_eq!(score_pick(&pick(selection, 3), &g), PickScore { points: 0, tie_break: None });
        }

        let broken = game(Some(14), None, true);
        assert_eq!(score_pick(&pick(Selection::Home, 3), &broken), PickScore { points: 0, tie_break: None });
    }

    #[test]
    fn test_not_picked_is_treated_as_wrong() {
        let g = game(Some(10), Some(3), true);
        let p = pick(Selection::NotPicked, 0);
        assert_eq!(awarded_points(&p, &g), 0);
        assert_eq!(tie_break(&p, &g), Some(10));
    }
}
