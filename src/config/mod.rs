pub mod settings;

pub use settings::{AppSettings, DatabaseSettings, LeaderboardSettings, SeasonSettings, Settings};
