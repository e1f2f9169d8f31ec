use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SeasonType {
    Preseason,
    Regular,
    Postseason,
    Off,
}

impl SeasonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonType::Preseason => "Preseason",
            SeasonType::Regular => "Regular Season",
            SeasonType::Postseason => "Postseason",
            SeasonType::Off => "Off Season",
        }
    }
}

/// Number of weeks in each segment of a season, as reported by the feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeasonLayout {
    pub preseason_weeks: u16,
    pub regular_weeks: u16,
    pub postseason_weeks: u16,
}

impl Default for SeasonLayout {
    fn default() -> Self {
        Self {
            preseason_weeks: 5, // Hall of Fame week + 4
            regular_weeks: 17,
            postseason_weeks: 5,
        }
    }
}

impl SeasonLayout {
    pub fn regular_start(&self) -> u16 {
        self.preseason_weeks.saturating_add(1)
    }

    pub fn postseason_start(&self) -> u16 {
        self.preseason_weeks
            .saturating_add(self.regular_weeks)
            .saturating_add(1)
    }

    pub fn total_weeks(&self) -> u16 {
        self.preseason_weeks
            .saturating_add(self.regular_weeks)
            .saturating_add(self.postseason_weeks)
    }

    /// Every week ordinal of the season, plus the one after it, must fit in a `u16`.
    pub fn validate(&self) -> Result<(), String> {
        let total = self.preseason_weeks as u32 + self.regular_weeks as u32 + self.postseason_weeks as u32;
        if total >= u16::MAX as u32 {
            return Err(format!(
                "season layout {}/{}/{} spans {} weeks",
                self.preseason_weeks, self.regular_weeks, self.postseason_weeks, total
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Year {
    pub value: i32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub layout: SeasonLayout,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Week {
    pub id: i64,
    pub year: i32,
    pub value: u16,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Week {
    /// Half-open: `start` is inside the week, `end` is not.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    pub fn overlaps(&self, other: &Week) -> bool {
        self.year == other.year && self.start < other.end && other.start < self.end
    }
}

/// A week ordinal resolved against a season layout.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WeekLabel {
    pub season_type: SeasonType,
    pub week: u16,
    pub name: &'static str,
}

impl WeekLabel {
    pub fn off_season() -> Self {
        Self {
            season_type: SeasonType::Off,
            week: 0,
            name: SeasonType::Off.as_str(),
        }
    }
}
