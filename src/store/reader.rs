use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Game, Pick, Result, Team, Week, Year};

/// Read access to the pool's persisted records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoolReader: Send + Sync {
    /// All seasons, oldest first
    async fn years(&self) -> Result<Vec<Year>>;

    async fn year(&self, value: i32) -> Result<Option<Year>>;

    /// Weeks of a season ordered by ordinal
    async fn weeks(&self, year: i32) -> Result<Vec<Week>>;

    async fn week(&self, year: i32, value: u16) -> Result<Option<Week>>;

    /// The week whose `[start, end)` range contains `at`
    async fn week_at(&self, at: DateTime<Utc>) -> Result<Option<Week>>;

    async fn teams(&self) -> Result<Vec<Team>>;

    /// Games matching the filter, ordered by kickoff then home team
    async fn games(&self, filter: &GameFilter) -> Result<Vec<Game>>;

    /// Picks placed on any of the given games
    async fn picks_for_games(&self, game_ids: &[i64]) -> Result<Vec<Pick>>;
}

/// Equality and range filters over games. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameFilter {
    pub year: Option<i32>,
    pub week: Option<u16>,
    pub first_week: Option<u16>,
    pub last_week: Option<u16>,
    pub team_id: Option<i64>,
    pub final_only: bool,
}

impl GameFilter {
    pub fn for_week(year: i32, week: u16) -> Self {
        Self {
            year: Some(year),
            week: Some(week),
            ..Self::default()
        }
    }

    pub fn for_weeks(year: i32, first_week: u16, last_week: u16) -> Self {
        Self {
            year: Some(year),
            first_week: Some(first_week),
            last_week: Some(last_week),
            ..Self::default()
        }
    }

    pub fn for_year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn team(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn final_only(mut self) -> Self {
        self.final_only = true;
        self
    }

    pub fn matches(&self, game: &Game) -> bool {
        self.year.map_or(true, |y| game.year == y)
            && self.week.map_or(true, |w| game.week == w)
            && self.first_week.map_or(true, |w| game.week >= w)
            && self.last_week.map_or(true, |w| game.week <= w)
            && self.team_id.map_or(true, |t| game.involves(t))
            && (!self.final_only || game.is_final)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn game(week: u16, is_final: bool) -> Game {
        Game {
            id: week as i64,
            week_id: week as i64,
            year: 2019,
            week,
            kickoff: Utc.with_ymd_and_hms(2019, 9, 8, 17, 0, 0).unwrap(),
            home_team_id: 3,
            visitor_team_id: 4,
            home_score: None,
            visitor_score: None,
            is_final,
        }
    }

    #[test]
    fn test_filter_matching() {
        assert!(GameFilter::default().matches(&game(6, false)));
        assert!(GameFilter::for_week(2019, 6).matches(&game(6, false)));
        assert!(!GameFilter::for_week(2020, 6).matches(&game(6, false)));

        let range = GameFilter::for_weeks(2019, 6, 8);
        assert!(!range.matches(&game(5, true)));
        assert!(range.matches(&game(8, true)));
        assert!(!range.matches(&game(9, true)));

        assert!(!GameFilter::for_year(2019).final_only().matches(&game(6, false)));
        assert!(GameFilter::for_year(2019).team(4).matches(&game(6, false)));
        assert!(!GameFilter::for_year(2019).team(9).matches(&game(6, false)));
    }
}
