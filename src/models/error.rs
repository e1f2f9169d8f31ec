use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User {user_id} already has a pick for game {game_id}")]
    DuplicatePick { user_id: i64, game_id: i64 },

    #[error("Invalid game: {0}")]
    InvalidGame(String),

    #[error("Invalid year: {0}")]
    InvalidYear(String),

    #[error("Invalid week: {0}")]
    InvalidWeek(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, PoolError>;
