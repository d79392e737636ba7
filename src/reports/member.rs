use crate::github::{CommitSummary, FetchResult, RepoSummary, UserProfile};
use crate::model::{Member, PullRequestCounts};
use std::collections::BTreeMap;

/// The member detail view: the roster record plus every on-demand GitHub
/// fetch, each kept as a [`FetchResult`] so the report can show what actually
/// happened per resource instead of conflating "no data" with "fetch failed".
#[derive(Debug)]
pub struct MemberDetail {
    pub member: Member,
    pub is_admin: bool,
    pub profile: FetchResult<UserProfile>,
    pub repos: FetchResult<Vec<RepoSummary>>,
    pub pulls: FetchResult<PullRequestCounts>,
    pub commits: FetchResult<Vec<CommitSummary>>,
    pub languages: FetchResult<BTreeMap<String, u64>>,
}
