//! Remote data fetchers for GitHub activity.
//!
//! Each fetcher is independently responsible for one resource type: account
//! profile, repository list, commit history, language breakdown, or
//! pull-request counts. They all report their outcome as a [`FetchResult`]
//! and never fail outright: transport and parse problems are logged at this
//! boundary, throttling yields whatever was gathered, and a missing access
//! token short-circuits to `Unavailable` without touching the network.

use super::client::{Client, is_throttled_response};
use super::fetch_result::FetchResult;
use super::models::{CommitItem, CommitSummary, IssueState, RepoSummary, SearchIssue, SearchResults, UserProfile};
use crate::Result;
use crate::model::PullRequestCounts;
use core::time::Duration;
use regex::Regex;
use reqwest::StatusCode;
use reqwest::header::LINK;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

const LOG_TARGET: &str = "    github";

/// Page size for repository listing requests.
const REPO_PAGE_SIZE: usize = 100;

/// Hard cap on repositories collected across pages.
const MAX_REPOS: usize = 300;

/// Repositories examined when assembling a commit history.
const COMMIT_REPO_LIMIT: usize = 10;

/// Page size for per-repository commit requests.
const COMMIT_PAGE_SIZE: usize = 100;

/// Repositories examined when summing language bytes.
const LANGUAGE_REPO_LIMIT: usize = 20;

/// Page size for the pull-request search.
const SEARCH_PAGE_SIZE: usize = 100;

/// Default pause between consecutive requests within one fetch.
pub const DEFAULT_PACING: Duration = Duration::from_millis(250);

/// Matches the `rel="next"` relation in a `Link` response header, tolerating
/// the unquoted and variably-spaced forms some proxies emit.
static NEXT_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"rel\s*=\s*"?next"?"#).expect("invalid regex"));

/// Typed access to the GitHub resources the dashboard needs.
#[derive(Debug)]
pub struct Provider {
    client: Client,
    pacing: Duration,
    token_noted: AtomicBool,
    profiles: Mutex<HashMap<String, Option<UserProfile>>>,
}

impl Provider {
    /// Create a provider. `pacing` is the fixed delay inserted between
    /// consecutive requests in multi-request fetches; tests pass
    /// `Duration::ZERO`.
    pub fn new(token: Option<&str>, base_url: impl Into<String>, pacing: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::new(token, base_url)?,
            pacing,
            token_noted: AtomicBool::new(false),
            profiles: Mutex::new(HashMap::new()),
        })
    }

    /// Fetch an account profile, remembering negative results.
    ///
    /// A remembered "not found" short-circuits future lookups for the same
    /// handle without touching the network.
    pub async fn fetch_user(&self, handle: &str) -> FetchResult<UserProfile> {
        if let Some(unavailable) = self.check_token() {
            return unavailable;
        }

        if let Some(cached) = self.cached_profile(handle) {
            return cached;
        }

        let url = format!("{}/users/{handle}", self.client.base_url());
        let resp = match self.client.get(&url).await {
            Ok(resp) => resp,
            Err(e) => return Self::failed("profile", handle, e),
        };

        if resp.status() == StatusCode::NOT_FOUND {
            log::debug!(target: LOG_TARGET, "GitHub account '{handle}' does not exist, remembering the negative result");
            self.remember_profile(handle, None);
            return FetchResult::NotFound;
        }

        if is_throttled_response(&resp) {
            return Self::throttled("profile", handle);
        }

        let resp = match resp.error_for_status() {
            Ok(resp) => resp,
            Err(e) => return Self::failed("profile", handle, e.into()),
        };

        match resp.json::<UserProfile>().await {
            Ok(profile) => {
                self.remember_profile(handle, Some(profile.clone()));
                FetchResult::Found(profile)
            }
            Err(e) => Self::failed("profile", handle, e.into()),
        }
    }

    /// Fetch the account's repositories, most recently updated first.
    ///
    /// Pagination stops at a page shorter than the page size, a page without
    /// a `rel="next"` link, or the overall repository cap. Throttling or a
    /// failure mid-way yields the partial list gathered so far instead of an
    /// error.
    pub async fn fetch_repositories(&self, handle: &str) -> FetchResult<Vec<RepoSummary>> {
        if let Some(unavailable) = self.check_token() {
            return unavailable;
        }

        let mut repos: Vec<RepoSummary> = Vec::new();
        let mut page = 1u32;

        loop {
            let url = format!(
                "{}/users/{handle}/repos?sort=updated&per_page={REPO_PAGE_SIZE}&page={page}",
                self.client.base_url()
            );

            let resp = match self.client.get(&url).await {
                Ok(resp) => resp,
                Err(e) => {
                    if repos.is_empty() {
                        return Self::failed("repositories", handle, e);
                    }
                    log::warn!(target: LOG_TARGET, "Repository listing for '{handle}' failed after {} item(s): {e:#}", repos.len());
                    return FetchResult::Partial(repos);
                }
            };

            if is_throttled_response(&resp) {
                log::warn!(
                    target: LOG_TARGET,
                    "GitHub throttled the repository listing for '{handle}', keeping the {} item(s) collected so far",
                    repos.len()
                );
                return FetchResult::Partial(repos);
            }

            if resp.status() == StatusCode::NOT_FOUND {
                return FetchResult::NotFound;
            }

            let resp = match resp.error_for_status() {
                Ok(resp) => resp,
                Err(e) => {
                    if repos.is_empty() {
                        return Self::failed("repositories", handle, e.into());
                    }
                    log::warn!(target: LOG_TARGET, "Repository listing for '{handle}' failed after {} item(s): {e:#}", repos.len());
                    return FetchResult::Partial(repos);
                }
            };

            let has_next = resp
                .headers()
                .get(LINK)
                .and_then(|h| h.to_str().ok())
                .is_some_and(|link| NEXT_LINK_REGEX.is_match(link));

            let page_items: Vec<RepoSummary> = match resp.json().await {
                Ok(items) => items,
                Err(e) => {
                    if repos.is_empty() {
                        return Self::failed("repositories", handle, e.into());
                    }
                    log::warn!(target: LOG_TARGET, "Repository page {page} for '{handle}' did not parse: {e:#}", );
                    return FetchResult::Partial(repos);
                }
            };

            let short_page = page_items.len() < REPO_PAGE_SIZE;
            repos.extend(page_items);

            if repos.len() >= MAX_REPOS {
                repos.truncate(MAX_REPOS);
                log::debug!(target: LOG_TARGET, "Reached the repository cap ({MAX_REPOS}) for '{handle}', stopping pagination");
                break;
            }

            if short_page || !has_next {
                break;
            }

            page += 1;
            tokio::time::sleep(self.pacing).await;
        }

        log::debug!(target: LOG_TARGET, "Collected {} repositories for '{handle}'", repos.len());
        FetchResult::Found(repos)
    }

    /// Fetch up to `count` of the account's most recent commits.
    ///
    /// Walks the most recently updated repositories (at most
    /// [`COMMIT_REPO_LIMIT`]), requesting commits authored by the account in
    /// each, stopping early once `count` commits are in hand. Results are
    /// merged, sorted newest first, and truncated to `count`.
    pub async fn fetch_commits(&self, handle: &str, count: usize) -> FetchResult<Vec<CommitSummary>> {
        if let Some(unavailable) = self.check_token() {
            return unavailable;
        }

        let repos = match self.fetch_repositories(handle).await {
            FetchResult::Found(repos) | FetchResult::Partial(repos) => repos,
            FetchResult::NotFound => return FetchResult::NotFound,
            FetchResult::Unavailable(reason) => return FetchResult::Unavailable(reason),
            FetchResult::Error(e) => return FetchResult::Error(e),
        };

        let mut commits: Vec<CommitSummary> = Vec::new();
        let mut throttled = false;

        for (index, repo) in repos.iter().take(COMMIT_REPO_LIMIT).enumerate() {
            if commits.len() >= count {
                break;
            }

            if index > 0 {
                tokio::time::sleep(self.pacing).await;
            }

            let per_page = count.min(COMMIT_PAGE_SIZE);
            let url = format!(
                "{}/repos/{}/commits?author={handle}&per_page={per_page}",
                self.client.base_url(),
                repo.full_name
            );

            let resp = match self.client.get(&url).await {
                Ok(resp) => resp,
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Could not fetch commits in '{}': {e:#}", repo.full_name);
                    continue;
                }
            };

            if is_throttled_response(&resp) {
                log::warn!(target: LOG_TARGET, "GitHub throttled the commit listing for '{handle}' at '{}'", repo.full_name);
                throttled = true;
                break;
            }

            // 409 is an empty repository; any other non-2xx repo is skipped too
            if !resp.status().is_success() {
                log::debug!(target: LOG_TARGET, "Skipping commits in '{}' (status {})", repo.full_name, resp.status());
                continue;
            }

            let items: Vec<CommitItem> = match resp.json().await {
                Ok(items) => items,
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Could not parse commits in '{}': {e:#}", repo.full_name);
                    continue;
                }
            };

            commits.extend(items.into_iter().map(|item| CommitSummary::from_item(item, &repo.full_name)));
        }

        let commits = merge_commits(commits, count);
        if throttled {
            FetchResult::Partial(commits)
        } else {
            FetchResult::Found(commits)
        }
    }

    /// Sum language byte counts across the account's repositories, looking at
    /// most at the first [`LANGUAGE_REPO_LIMIT`] of them. Stops early on
    /// throttling, keeping the sums gathered so far.
    pub async fn fetch_languages(&self, handle: &str) -> FetchResult<BTreeMap<String, u64>> {
        if let Some(unavailable) = self.check_token() {
            return unavailable;
        }

        let repos = match self.fetch_repositories(handle).await {
            FetchResult::Found(repos) | FetchResult::Partial(repos) => repos,
            FetchResult::NotFound => return FetchResult::NotFound,
            FetchResult::Unavailable(reason) => return FetchResult::Unavailable(reason),
            FetchResult::Error(e) => return FetchResult::Error(e),
        };

        let mut totals: BTreeMap<String, u64> = BTreeMap::new();
        let mut throttled = false;

        for (index, repo) in repos.iter().take(LANGUAGE_REPO_LIMIT).enumerate() {
            if index > 0 {
                tokio::time::sleep(self.pacing).await;
            }

            let url = format!("{}/repos/{}/languages", self.client.base_url(), repo.full_name);

            let resp = match self.client.get(&url).await {
                Ok(resp) => resp,
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Could not fetch languages in '{}': {e:#}", repo.full_name);
                    continue;
                }
            };

            if is_throttled_response(&resp) {
                log::warn!(target: LOG_TARGET, "GitHub throttled the language listing for '{handle}' at '{}'", repo.full_name);
                throttled = true;
                break;
            }

            if !resp.status().is_success() {
                log::debug!(target: LOG_TARGET, "Skipping languages in '{}' (status {})", repo.full_name, resp.status());
                continue;
            }

            let langs: BTreeMap<String, u64> = match resp.json().await {
                Ok(langs) => langs,
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Could not parse languages in '{}': {e:#}", repo.full_name);
                    continue;
                }
            };

            for (language, bytes) in langs {
                *totals.entry(language).or_insert(0) += bytes;
            }
        }

        if throttled {
            FetchResult::Partial(totals)
        } else {
            FetchResult::Found(totals)
        }
    }

    /// Count the account's pull requests by state via the search API.
    ///
    /// A single search page is inspected, so the buckets cover the most
    /// recent [`SEARCH_PAGE_SIZE`] pull requests.
    pub async fn fetch_pulls(&self, handle: &str) -> FetchResult<PullRequestCounts> {
        if let Some(unavailable) = self.check_token() {
            return unavailable;
        }

        let url = format!(
            "{}/search/issues?q=type:pr+author:{handle}&per_page={SEARCH_PAGE_SIZE}",
            self.client.base_url()
        );

        let resp = match self.client.get(&url).await {
            Ok(resp) => resp,
            Err(e) => return Self::failed("pull requests", handle, e),
        };

        if is_throttled_response(&resp) {
            return Self::throttled("pull requests", handle);
        }

        let resp = match resp.error_for_status() {
            Ok(resp) => resp,
            Err(e) => return Self::failed("pull requests", handle, e.into()),
        };

        let results: SearchResults = match resp.json().await {
            Ok(results) => results,
            Err(e) => return Self::failed("pull requests", handle, e.into()),
        };

        let fetched = u64::try_from(results.items.len()).unwrap_or(u64::MAX);
        if results.total_count > fetched {
            log::debug!(
                target: LOG_TARGET,
                "Pull-request counts for '{handle}' cover the {fetched} most recent of {}",
                results.total_count
            );
        }

        FetchResult::Found(tally_pulls(&results.items))
    }

    /// Gate every fetcher on credentials: without a token the fetch is
    /// skipped entirely, logged once per provider.
    fn check_token<T>(&self) -> Option<FetchResult<T>> {
        if self.client.is_authenticated() {
            return None;
        }

        if !self.token_noted.swap(true, Ordering::Relaxed) {
            log::warn!(target: LOG_TARGET, "No GitHub access token configured, GitHub data will be empty");
        }

        Some(FetchResult::Unavailable("no GitHub access token configured".to_string()))
    }

    fn cached_profile(&self, handle: &str) -> Option<FetchResult<UserProfile>> {
        let profiles = self.profiles.lock().unwrap_or_else(PoisonError::into_inner);

        profiles.get(handle).map(|cached| match cached {
            Some(profile) => FetchResult::Found(profile.clone()),
            None => FetchResult::NotFound,
        })
    }

    fn remember_profile(&self, handle: &str, profile: Option<UserProfile>) {
        let mut profiles = self.profiles.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = profiles.insert(handle.to_string(), profile);
    }

    fn failed<T>(what: &str, handle: &str, e: ohno::AppError) -> FetchResult<T> {
        log::warn!(target: LOG_TARGET, "Could not fetch {what} for '{handle}': {e:#}");
        FetchResult::Error(Arc::new(e))
    }

    fn throttled<T>(what: &str, handle: &str) -> FetchResult<T> {
        log::warn!(target: LOG_TARGET, "GitHub rate limit still exhausted fetching {what} for '{handle}'");
        FetchResult::Unavailable("GitHub rate limit exhausted".to_string())
    }
}

/// Merge commits from several repositories: newest first, at most `count`,
/// commits without a date at the end.
fn merge_commits(mut commits: Vec<CommitSummary>, count: usize) -> Vec<CommitSummary> {
    commits.sort_by(|a, b| b.date.cmp(&a.date));
    commits.truncate(count);
    commits
}

/// Bucket search results into disjoint open/closed/merged counts.
fn tally_pulls(items: &[SearchIssue]) -> PullRequestCounts {
    let mut counts = PullRequestCounts::default();

    for item in items {
        if item.pull_request.as_ref().is_some_and(|pr| pr.merged_at.is_some()) {
            counts.merged += 1;
        } else if item.state == IssueState::Open {
            counts.open += 1;
        } else {
            counts.closed += 1;
        }
    }

    counts
}
