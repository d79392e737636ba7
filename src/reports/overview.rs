use crate::model::Member;
use crate::stats::{ActivityField, LanguageDistribution, LeaderboardRow, TrendDay, language_distribution, leaderboard, pull_request_trend, total};
use chrono::{DateTime, NaiveDate, Utc};
use strum::IntoEnumIterator;

/// Everything the overview reports render, computed once from the member
/// collection so the console, JSON, and CSV forms agree.
#[derive(Debug, Clone)]
pub struct Overview {
    pub member_count: usize,
    pub connected_count: usize,
    pub fetched_at: Option<DateTime<Utc>>,
    pub totals: Vec<(ActivityField, u64)>,
    pub leaderboard_field: ActivityField,
    pub leaderboard: Vec<LeaderboardRow>,
    pub trend: Vec<TrendDay>,
    pub languages: LanguageDistribution,
}

impl Overview {
    /// Fold the member collection into the overview's derived views.
    #[must_use]
    pub fn build(
        members: &[Member],
        fetched_at: Option<DateTime<Utc>>,
        leaderboard_field: ActivityField,
        trend_days: u32,
        leaderboard_size: usize,
        today: NaiveDate,
    ) -> Self {
        Self {
            member_count: members.len(),
            connected_count: members.iter().filter(|m| m.github_connected).count(),
            fetched_at,
            totals: ActivityField::iter().map(|field| (field, total(members, field))).collect(),
            leaderboard_field,
            leaderboard: leaderboard(members, leaderboard_field, leaderboard_size),
            trend: pull_request_trend(members, trend_days, today),
            languages: language_distribution(members),
        }
    }
}
