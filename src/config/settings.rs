use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use std::path::Path;

use crate::models::SeasonLayout;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub season: SeasonSettings,
    pub leaderboard: LeaderboardSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonSettings {
    /// Used for seasons the feed stored without segment lengths.
    pub default_layout: SeasonLayout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSettings {
    pub break_ties: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Pick Pool".to_string(),
                log_level: "info".to_string(),
            },
            database: DatabaseSettings {
                url: "sqlite://pick_pool.db".to_string(),
                max_connections: 5,
            },
            season: SeasonSettings {
                default_layout: SeasonLayout::default(),
            },
            leaderboard: LeaderboardSettings {
                break_ties: false,
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("PICK_POOL").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// `new`, or the built-in defaults alongside the error that stopped a layer
    /// from loading. Settings are read before logging is set up, so reporting
    /// is left to the caller.
    pub fn load() -> (Self, Option<ConfigError>) {
        match Self::new() {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.trim().is_empty() {
            return Err("Database URL must not be empty".to_string());
        }

        if self.database.max_connections == 0 {
            return Err("Database max_connections must be at least 1".to_string());
        }

        if self.season.default_layout.regular_weeks == 0 {
            return Err("Default season layout needs at least one regular season week".to_string());
        }

        self.season.default_layout.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.season.default_layout, SeasonLayout::default());
        assert!(!settings.leaderboard.break_ties);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.database.max_connections = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.season.default_layout.regular_weeks = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.season.default_layout.preseason_weeks = 60000;
        settings.season.default_layout.regular_weeks = 6000;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_from_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("pick_pool_settings_{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[leaderboard]\nbreak_ties = true\n\n[season.default_layout]\npreseason_weeks = 4\nregular_weeks = 18\npostseason_weeks = 5").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(settings.leaderboard.break_ties);
        assert_eq!(settings.season.default_layout.regular_weeks, 18);
        assert_eq!(settings.database.max_connections, 5);
    }

    #[test]
    fn test_load_falls_back_on_bad_override() {
        std::env::set_var("PICK_POOL__DATABASE__MAX_CONNECTIONS", "many");
        let (settings, error) = Settings::load();
        std::env::remove_var("PICK_POOL__DATABASE__MAX_CONNECTIONS");

        assert!(error.is_some());
        assert_eq!(settings.database.max_connections, 5);
    }
}
