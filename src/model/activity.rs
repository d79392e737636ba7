use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate GitHub activity counts captured for one member.
///
/// Embedded inside a [`super::Member`]; it has no identity of its own and is
/// only ever replaced wholesale when a member record is refreshed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivitySnapshot {
    pub public_repos: u64,
    pub private_repos: u64,
    pub stars: u64,
    pub forks: u64,
    pub pull_requests: PullRequestCounts,
    pub commits: u64,
    pub issues: u64,
    pub languages: LanguageMix,
    /// Creation times of the most recent pull requests, newest first.
    pub recent_pulls: Vec<DateTime<Utc>>,
}

/// Pull requests broken down by state. `closed` means closed without merge,
/// so the three buckets are disjoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PullRequestCounts {
    pub open: u64,
    pub closed: u64,
    pub merged: u64,
}

impl PullRequestCounts {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.open + self.closed + self.merged
    }
}

/// Language breakdown in either of the two wire forms the documents carry.
///
/// Older documents store a plain name→count object; newer ones store a list
/// of `{name, count}` entries. Counts are byte counts or repository counts
/// depending on how the snapshot was produced, which callers infer from the
/// magnitude of the values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LanguageMix {
    Counts(BTreeMap<String, i64>),
    Entries(Vec<LanguageEntry>),
}

/// One `{name, count}` pair from the list form of [`LanguageMix`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
    pub count: i64,
}

impl Default for LanguageMix {
    fn default() -> Self {
        Self::Counts(BTreeMap::new())
    }
}

impl LanguageMix {
    /// All (name, count) pairs regardless of wire form.
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, i64)> {
        match self {
            Self::Counts(map) => map.iter().map(|(name, count)| (name.as_str(), *count)).collect(),
            Self::Entries(list) => list.iter().map(|e| (e.name.as_str(), e.count)).collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Counts(map) => map.is_empty(),
            Self::Entries(list) => list.is_empty(),
        }
    }
}
