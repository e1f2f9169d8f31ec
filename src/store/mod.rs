pub mod reader;
pub mod memory;
pub mod sqlite;
pub mod fixture;

pub use reader::{GameFilter, PoolReader};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use fixture::Fixture;

use crate::models::{Game, PoolError, Result, Week, Year};

pub(crate) fn validate_year(year: &Year) -> Result<()> {
    if year.start >= year.end {
        return Err(PoolError::InvalidYear(format!(
            "season {} starts at {} but ends at {}",
            year.value, year.start, year.end
        )));
    }
    year.layout
        .validate()
        .map_err(|e| PoolError::InvalidYear(format!("season {}: {}", year.value, e)))
}

/// Week ranges are half-open and must not overlap inside a season.
pub(crate) fn validate_week<'a>(week: &Week, existing: impl IntoIterator<Item = &'a Week>) -> Result<()> {
    if week.start >= week.end {
        return Err(PoolError::InvalidWeek(format!(
            "week {} of {} starts at {} but ends at {}",
            week.value, week.year, week.start, week.end
        )));
    }

    if let Some(other) = existing.into_iter().find(|w| w.overlaps(week)) {
        return Err(PoolError::InvalidWeek(format!(
            "week {} of {} overlaps week {}",
            week.value, week.year, other.value
        )));
    }

    Ok(())
}

pub(crate) fn validate_game(game: &Game) -> Result<()> {
    if game.home_team_id == game.visitor_team_id {
        return Err(PoolError::InvalidGame(format!(
            "game {} has team {} on both sides",
            game.id, game.home_team_id
        )));
    }
    Ok(())
}
