pub mod outcome;
pub mod pick;
pub mod leaderboard;
pub mod standings;
pub mod calculator;

pub use outcome::{winner, Outcome};
pub use pick::{score_pick, PickScore};
pub use calculator::{PoolCalculator, UserPicks, WeekPicks, WeekSummary};
