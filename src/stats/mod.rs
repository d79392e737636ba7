//! Aggregation functions over the member collection.
//!
//! Everything in here is pure and synchronous: the functions fold an
//! in-memory slice of members into derived views (totals, rankings, per-day
//! buckets, language distributions) and never fetch anything. Members without
//! an activity snapshot contribute zero to sums and are excluded from
//! rankings.

mod languages;
mod leaderboard;
mod totals;
mod trend;

pub use languages::{LanguageDistribution, LanguageShare, LanguageUnit, language_distribution};
pub use leaderboard::{LeaderboardRow, leaderboard};
pub use totals::{ActivityField, total};
pub use trend::{TrendDay, pull_request_trend};
