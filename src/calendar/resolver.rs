use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{Game, SeasonLayout, SeasonType, Week, WeekLabel, Year};

const HALL_OF_FAME_WEEK: &str = "Hall of Fame Week";

/// Postseason round names, last round first.
const POSTSEASON_ROUNDS: [&str; 4] = [
    "Super Bowl",
    "Pro Bowl",
    "Conference Championships",
    "Divisional Playoffs",
];
const WILD_CARD_ROUND: &str = "Wild Card Weekend";

impl SeasonLayout {
    /// Map a league-wide week ordinal onto its segment and segment-relative number.
    pub fn resolve(&self, value: u16) -> WeekLabel {
        let pre = self.preseason_weeks as u32;
        let regular_end = pre + self.regular_weeks as u32;
        let post_end = regular_end + self.postseason_weeks as u32;

        // Offsets never exceed `value`, so narrowing back to u16 is lossless
        match value as u32 {
            0 => WeekLabel::off_season(),
            1 if pre > 0 => WeekLabel {
                season_type: SeasonType::Preseason,
                week: 1,
                name: HALL_OF_FAME_WEEK,
            },
            v if v <= pre => WeekLabel {
                season_type: SeasonType::Preseason,
                week: (v - 1) as u16,
                name: SeasonType::Preseason.as_str(),
            },
            v if v <= regular_end => WeekLabel {
                season_type: SeasonType::Regular,
                week: (v - pre) as u16,
                name: SeasonType::Regular.as_str(),
            },
            v if v <= post_end => {
                let from_end = (post_end - v) as usize;
                WeekLabel {
                    season_type: SeasonType::Postseason,
                    week: (v - regular_end) as u16,
                    name: POSTSEASON_ROUNDS.get(from_end).copied().unwrap_or(WILD_CARD_ROUND),
                }
            }
            _ => WeekLabel::off_season(),
        }
    }
}

/// The week containing an instant, with the layout of its season.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CurrentWeek {
    pub week: Week,
    pub layout: SeasonLayout,
    pub label: WeekLabel,
}

impl CurrentWeek {
    pub fn year(&self) -> i32 {
        self.week.year
    }

    pub fn value(&self) -> u16 {
        self.week.value
    }

    pub fn season_type(&self) -> SeasonType {
        self.label.season_type
    }
}

/// Resolve the week whose `[start, end)` range contains `at`.
///
/// Weeks whose season has no stored year fall back to `default_layout`.
/// `None` means the league is in its off-season.
pub fn current_week(
    years: &[Year],
    weeks: &[Week],
    at: DateTime<Utc>,
    default_layout: SeasonLayout,
) -> Option<CurrentWeek> {
    let week = weeks.iter().find(|w| w.contains(at))?;

    let layout = match years.iter().find(|y| y.value == week.year) {
        Some(year) => year.layout,
        None => {
            warn!("No year {} stored for week {}, using default layout", week.year, week.value);
            default_layout
        }
    };

    let label = layout.resolve(week.value);
    debug!("Resolved {} to {} week {} of {}", at, label.name, label.week, week.year);

    Some(CurrentWeek {
        week: week.clone(),
        layout,
        label,
    })
}

/// Year and inclusive week-ordinal range that season-to-date aggregation covers.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SeasonWindow {
    Off,
    Season {
        year: i32,
        first_week: u16,
        last_week: u16,
    },
}

impl SeasonWindow {
    /// Only the segment the current week belongs to counts.
    pub fn resolve(current: Option<&CurrentWeek>) -> Self {
        let Some(current) = current else {
            return SeasonWindow::Off;
        };

        let first_week = match current.season_type() {
            SeasonType::Preseason => 1,
            SeasonType::Regular => current.layout.regular_start(),
            SeasonType::Postseason => current.layout.postseason_start(),
            SeasonType::Off => return SeasonWindow::Off,
        };

        SeasonWindow::Season {
            year: current.year(),
            first_week,
            last_week: current.value(),
        }
    }

    pub fn is_off(&self) -> bool {
        matches!(self, SeasonWindow::Off)
    }

    pub fn contains_week(&self, year: i32, week: u16) -> bool {
        match *self {
            SeasonWindow::Off => false,
            SeasonWindow::Season { year: y, first_week, last_week } => {
                y == year && first_week <= week && week <= last_week
            }
        }
    }

    pub fn contains(&self, game: &Game) -> bool {
        self.contains_week(game.year, game.week)
    }
}

/// Season a calendar date belongs to when no stored year is available:
/// September onwards opens a new season.
pub fn season_for_date(date: NaiveDate) -> i32 {
    if date.month() > 8 {
        date.year()
    } else {
        date.year() - 1
    }
}
