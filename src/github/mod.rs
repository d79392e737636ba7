//! GitHub data collection.
//!
//! [`Client`] is the rate-limit-aware HTTP layer; [`Provider`] builds the
//! typed fetchers on top of it, one per resource type. Every fetcher reports
//! its outcome as a [`FetchResult`] so callers can tell "no data" apart from
//! "fetch failed" without the fetchers ever propagating an error.

mod client;
mod fetch_result;
mod models;
mod provider;

pub use client::{Client, RateLimitInfo, is_throttled_response};
pub use fetch_result::FetchResult;
pub use models::{CommitAuthor, CommitDetail, CommitItem, CommitSummary, IssueState, PullRequestMarker, RepoSummary, SearchIssue, SearchResults, UserProfile};
pub use provider::{DEFAULT_PACING, Provider};
