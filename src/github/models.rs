//! Wire models for the GitHub REST API, plus the projections handed to
//! reports. Only the fields this tool reads are declared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GitHub account profile from the users endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One repository from the per-user repository listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSummary {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One commit from the per-repository commits endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitItem {
    pub sha: String,
    pub commit: CommitDetail,
}

/// The git-level detail block inside a [`CommitItem`].
#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub message: String,
    pub author: Option<CommitAuthor>,
}

/// The git author block inside a [`CommitDetail`].
#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// Commit projection used by reports: wire data plus the repository it was
/// found in.
#[derive(Debug, Clone, Serialize)]
pub struct CommitSummary {
    pub sha: String,
    pub repo: String,
    pub message: String,
    pub author: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl CommitSummary {
    #[must_use]
    pub fn from_item(item: CommitItem, repo: &str) -> Self {
        let author = item.commit.author.as_ref().and_then(|a| a.name.clone());
        let date = item.commit.author.as_ref().and_then(|a| a.date);

        Self {
            sha: item.sha,
            repo: repo.to_string(),
            message: item.commit.message,
            author,
            date,
        }
    }

    /// The first line of the commit message.
    #[must_use]
    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

/// Response shape of the issue search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<SearchIssue>,
}

/// Minimal issue/PR info from the search endpoint. Only the two fields the
/// pull-request tally reads are declared.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchIssue {
    pub state: IssueState,
    pub pull_request: Option<PullRequestMarker>,
}

/// Issue state: open or closed
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// Marker type carried by issues that are actually pull requests. The
/// `merged_at` field is populated when the PR has been merged.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PullRequestMarker {
    pub merged_at: Option<DateTime<Utc>>,
}
