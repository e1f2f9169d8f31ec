pub mod resolver;

pub use resolver::{current_week, season_for_date, CurrentWeek, SeasonWindow};
