use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{Game, Pick, PoolError, Result, Team, Week, Year};
use super::{validate_game, validate_week, validate_year, Fixture, GameFilter, PoolReader};

/// In-process store. Seed it through `&mut self`, then share it behind an `Arc`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    years: Vec<Year>,
    weeks: Vec<Week>,
    teams: Vec<Team>,
    games: Vec<Game>,
    picks: Vec<Pick>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixture(fixture: Fixture) -> Result<Self> {
        let mut store = Self::new();
        for year in fixture.years {
            store.insert_year(year)?;
        }
        for week in fixture.weeks {
            store.insert_week(week)?;
        }
        for team in fixture.teams {
            store.insert_team(team);
        }
        for game in fixture.games {
            store.insert_game(game)?;
        }
        for pick in fixture.picks {
            store.insert_pick(pick)?;
        }
        debug!(
            "Loaded fixture: {} weeks, {} games, {} picks",
            store.weeks.len(),
            store.games.len(),
            store.picks.len()
        );
        Ok(store)
    }

    /// Replaces a stored season with the same value.
    pub fn insert_year(&mut self, year: Year) -> Result<()> {
        validate_year(&year)?;
        self.years.retain(|y| y.value != year.value);
        self.years.push(year);
        self.years.sort_by_key(|y| y.value);
        Ok(())
    }

    pub fn insert_week(&mut self, week: Week) -> Result<()> {
        if self.weeks.iter().any(|w| w.year == week.year && w.value == week.value) {
            return Err(PoolError::InvalidWeek(format!(
                "week {} of {} already exists",
                week.value, week.year
            )));
        }
        validate_week(&week, &self.weeks)?;
        self.weeks.push(week);
        self.weeks.sort_by_key(|w| (w.year, w.value));
        Ok(())
    }

    pub fn insert_team(&mut self, team: Team) {
        self.teams.retain(|t| t.id != team.id);
        self.teams.push(team);
        self.teams.sort_by_key(|t| t.id);
    }

    /// The game's `year`/`week` are taken from the stored week it references.
    pub fn insert_game(&mut self, mut game: Game) -> Result<()> {
        validate_game(&game)?;
        let week = self
            .weeks
            .iter()
            .find(|w| w.id == game.week_id)
            .ok_or_else(|| PoolError::NotFound(format!("week {} for game {}", game.week_id, game.id)))?;
        game.year = week.year;
        game.week = week.value;
        for team_id in [game.home_team_id, game.visitor_team_id] {
            if !self.teams.iter().any(|t| t.id == team_id) {
                return Err(PoolError::NotFound(format!("team {} for game {}", team_id, game.id)));
            }
        }

        self.games.retain(|g| g.id != game.id);
        self.games.push(game);
        self.games.sort_by_key(|g| (g.kickoff, g.home_team_id, g.id));
        Ok(())
    }

    pub fn insert_pick(&mut self, pick: Pick) -> Result<()> {
        if !self.games.iter().any(|g| g.id == pick.game_id) {
            return Err(PoolError::NotFound(format!("game {} for pick {}", pick.game_id, pick.id)));
        }
        if self
            .picks
            .iter()
            .any(|p| p.user.id == pick.user.id && p.game_id == pick.game_id)
        {
            return Err(PoolError::DuplicatePick {
                user_id: pick.user.id,
                game_id: pick.game_id,
            });
        }
        self.picks.push(pick);
        Ok(())
    }
}

#[async_trait]
impl PoolReader for MemoryStore {
    async fn years(&self) -> Result<Vec<Year>> {
        Ok(self.years.clone())
    }

    async fn year(&self, value: i32) -> Result<Option<Year>> {
        Ok(self.years.iter().find(|y| y.value == value).cloned())
    }

    async fn weeks(&self, year: i32) -> Result<Vec<Week>> {
        Ok(self.weeks.iter().filter(|w| w.year == year).cloned().collect())
    }

    async fn week(&self, year: i32, value: u16) -> Result<Option<Week>> {
        Ok(self
            .weeks
            .iter()
            .find(|w| w.year == year && w.value == value)
            .cloned())
    }

    async fn week_at(&self, at: DateTime<Utc>) -> Result<Option<Week>> {
        Ok(self.weeks.iter().find(|w| w.contains(at)).cloned())
    }

    async fn teams(&self) -> Result<Vec<Team>> {
        Ok(self.teams.clone())
    }

    async fn games(&self, filter: &GameFilter) -> Result<Vec<Game>> {
        Ok(self.games.iter().filter(|g| filter.matches(g)).cloned().collect())
    }

    async fn picks_for_games(&self, game_ids: &[i64]) -> Result<Vec<Pick>> {
        Ok(self
            .picks
            .iter()
            .filter(|p| game_ids.contains(&p.game_id))
            .cloned()
            .collect())
    }
}
