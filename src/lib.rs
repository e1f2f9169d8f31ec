pub mod models;
pub mod config;
pub mod calendar;
pub mod scoring;
pub mod store;

pub use models::{Game, Pick, PoolError, Result, Selection, Team, TeamCode, User, Week, Year};
pub use config::Settings;
pub use scoring::PoolCalculator;
pub use store::{Fixture, MemoryStore, PoolReader, SqliteStore};
