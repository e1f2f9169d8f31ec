use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{Game, Pick, Result, Team, Week, Year};

/// A JSON snapshot of a pool, as the feed import would have stored it.
///
/// `teams` defaults to the full catalog when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Fixture {
    #[serde(default)]
    pub years: Vec<Year>,
    #[serde(default)]
    pub weeks: Vec<Week>,
    #[serde(default = "Team::catalog")]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub picks: Vec<Pick>,
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
