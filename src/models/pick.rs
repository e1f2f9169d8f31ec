use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::scoring::outcome::Outcome;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct User {
    pub id: i64,
    pub display_name: String,
}

impl User {
    pub fn new(id: i64, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    NotPicked,
    Home,
    Visitor,
    Tie,
}

impl Selection {
    pub fn code(&self) -> i16 {
        match self {
            Selection::NotPicked => 0,
            Selection::Home => 1,
            Selection::Visitor => 2,
            Selection::Tie => 3,
        }
    }

    /// Unknown codes decode to `NotPicked`, which never scores.
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => Selection::NotPicked,
            1 => Selection::Home,
            2 => Selection::Visitor,
            3 => Selection::Tie,
            other => {
                warn!("Unknown pick selection code {}, treating as not picked", other);
                Selection::NotPicked
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Selection::NotPicked => "To Be Picked",
            Selection::Home => "Home Team",
            Selection::Visitor => "Visitor Team",
            Selection::Tie => "Tied Game",
        }
    }

    pub fn matches(&self, outcome: Outcome) -> bool {
        matches!(
            (self, outcome),
            (Selection::Home, Outcome::Home)
                | (Selection::Visitor, Outcome::Visitor)
                | (Selection::Tie, Outcome::Tie)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pick {
    pub id: i64,
    pub user: User,
    pub game_id: i64,
    #[serde(default)]
    pub selection: Selection,
    #[serde(default)]
    pub picked_tie_break: u32,
}
