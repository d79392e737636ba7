//! GitHub API client
//!
//! Rate-limit aware HTTP client for the GitHub REST API. Requests carry the
//! access token when one is configured; throttled responses are retried after
//! the reset time the server advertises.

use crate::Result;
use chrono::{DateTime, Utc};
use core::time::Duration;
use ohno::IntoAppError;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::sync::atomic::{AtomicBool, Ordering};

const LOG_TARGET: &str = "    github";

/// Request budget for a throttled URL, counting the initial attempt.
const MAX_ATTEMPTS: u32 = 3;

/// Wait applied when a throttled response carries no usable reset header.
const DEFAULT_RATE_LIMIT_WAIT: Duration = Duration::from_secs(60);

/// Upper bound on a single rate-limit wait, guarding against skewed
/// server-supplied reset timestamps.
const MAX_RATE_LIMIT_WAIT: Duration = Duration::from_secs(3600);

/// Rate limit state from response headers. Either header may be missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateLimitInfo {
    pub remaining: Option<u64>,
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimitInfo {
    /// Extract rate limit information from API response headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let remaining = headers
            .get("x-ratelimit-remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok());

        let reset_at = headers
            .get("x-ratelimit-reset")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Self { remaining, reset_at }
    }

    /// Whether the remaining-quota header says the quota is used up.
    #[must_use]
    pub const fn exhausted(&self) -> bool {
        matches!(self.remaining, Some(0))
    }
}

/// GitHub API client with rate-limit handling.
#[derive(Debug)]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
    authenticated: bool,
    token_warned: AtomicBool,
}

impl Client {
    /// Create a new client with an optional access token and base URL.
    pub fn new(token: Option<&str>, base_url: impl Into<String>) -> Result<Self> {
        use reqwest::header::{AUTHORIZATION, HeaderValue};

        let mut client_builder = reqwest::Client::builder().user_agent("teampulse");

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("Bearer {t}"))?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            client_builder = client_builder.default_headers(headers);
        }

        Ok(Self {
            client: client_builder.build()?,
            base_url: base_url.into(),
            authenticated: token.is_some(),
            token_warned: AtomicBool::new(false),
        })
    }

    /// Get the base URL for this client
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether an access token was configured.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Issue a GET request, waiting out rate limits.
    ///
    /// On a 429, or a 403 whose remaining-quota header reads zero, the client
    /// sleeps until the advertised reset time (60s when the header is absent)
    /// and retries, up to [`MAX_ATTEMPTS`] requests in total. The final
    /// response is returned as-is whatever its status; only transport
    /// failures produce an error.
    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        self.warn_once_if_anonymous();

        let mut attempt = 1;
        loop {
            let resp = self
                .client
                .get(url)
                .send()
                .await
                .into_app_err_with(|| format!("requesting '{url}'"))?;

            let rate_limit = RateLimitInfo::from_headers(resp.headers());
            if !is_throttled(resp.status(), &rate_limit) || attempt >= MAX_ATTEMPTS {
                return Ok(resp);
            }

            let wait = retry_delay(&rate_limit, Utc::now());
            log::warn!(
                target: LOG_TARGET,
                "GitHub rate limit hit for '{url}' (attempt {attempt} of {MAX_ATTEMPTS}), waiting {}s",
                wait.as_secs()
            );
            tokio::time::sleep(wait).await;

            attempt += 1;
        }
    }

    fn warn_once_if_anonymous(&self) {
        if !self.authenticated && !self.token_warned.swap(true, Ordering::Relaxed) {
            log::warn!(target: LOG_TARGET, "No GitHub access token configured, requests are anonymous and tightly rate limited");
        }
    }
}

/// Whether a response is a throttling signal: 429, or 403 with the quota
/// exhausted. Plain 403s (missing permissions) are not throttling.
#[must_use]
pub fn is_throttled_response(resp: &reqwest::Response) -> bool {
    is_throttled(resp.status(), &RateLimitInfo::from_headers(resp.headers()))
}

const fn is_throttled(status: StatusCode, rate_limit: &RateLimitInfo) -> bool {
    match status {
        StatusCode::TOO_MANY_REQUESTS => true,
        StatusCode::FORBIDDEN => rate_limit.exhausted(),
        _ => false,
    }
}

/// How long to wait before retrying a throttled request.
fn retry_delay(rate_limit: &RateLimitInfo, now: DateTime<Utc>) -> Duration {
    let Some(reset_at) = rate_limit.reset_at else {
        return DEFAULT_RATE_LIMIT_WAIT;
    };

    // A reset in the past means the window already rolled over; retry now.
    (reset_at - now).to_std().unwrap_or(Duration::ZERO).min(MAX_RATE_LIMIT_WAIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(remaining: Option<&'static str>, reset: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(r) = remaining {
            let _ = headers.insert("x-ratelimit-remaining", HeaderValue::from_static(r));
        }
        if let Some(r) = reset {
            let _ = headers.insert("x-ratelimit-reset", HeaderValue::from_static(r));
        }
        headers
    }

    #[test]
    fn test_rate_limit_from_headers() {
        let info = RateLimitInfo::from_headers(&headers(Some("4999"), Some("1704067200")));

        assert_eq!(info.remaining, Some(4999));
        assert_eq!(info.reset_at.unwrap().timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_rate_limit_missing_headers() {
        let info = RateLimitInfo::from_headers(&HeaderMap::new());

        assert_eq!(info.remaining, None);
        assert_eq!(info.reset_at, None);
        assert!(!info.exhausted());
    }

    #[test]
    fn test_rate_limit_partial_headers() {
        let info = RateLimitInfo::from_headers(&headers(Some("0"), None));

        assert!(info.exhausted());
        assert!(info.reset_at.is_none());
    }

    #[test]
    fn test_rate_limit_invalid_values() {
        let info = RateLimitInfo::from_headers(&headers(Some("lots"), Some("soon")));

        assert_eq!(info.remaining, None);
        assert_eq!(info.reset_at, None);
    }

    #[test]
    fn test_is_throttled_on_429() {
        let info = RateLimitInfo::default();
        assert!(is_throttled(StatusCode::TOO_MANY_REQUESTS, &info));
    }

    #[test]
    fn test_is_throttled_on_403_with_exhausted_quota() {
        let info = RateLimitInfo {
            remaining: Some(0),
            reset_at: None,
        };
        assert!(is_throttled(StatusCode::FORBIDDEN, &info));
    }

    #[test]
    fn test_plain_403_is_not_throttling() {
        let with_quota = RateLimitInfo {
            remaining: Some(41),
            reset_at: None,
        };
        assert!(!is_throttled(StatusCode::FORBIDDEN, &with_quota));
        assert!(!is_throttled(StatusCode::FORBIDDEN, &RateLimitInfo::default()));
    }

    #[test]
    fn test_success_is_not_throttling() {
        let info = RateLimitInfo {
            remaining: Some(0),
            reset_at: None,
        };
        assert!(!is_throttled(StatusCode::OK, &info));
    }

    #[test]
    fn test_retry_delay_defaults_without_reset_header() {
        let info = RateLimitInfo::default();
        assert_eq!(retry_delay(&info, Utc::now()), DEFAULT_RATE_LIMIT_WAIT);
    }

    #[test]
    fn test_retry_delay_from_future_reset() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let info = RateLimitInfo {
            remaining: Some(0),
            reset_at: DateTime::from_timestamp(1_700_000_005, 0),
        };

        assert_eq!(retry_delay(&info, now), Duration::from_secs(5));
    }

    #[test]
    fn test_retry_delay_past_reset_is_zero() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let info = RateLimitInfo {
            remaining: Some(0),
            reset_at: DateTime::from_timestamp(1_699_999_000, 0),
        };

        assert_eq!(retry_delay(&info, now), Duration::ZERO);
    }

    #[test]
    fn test_retry_delay_is_capped() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let info = RateLimitInfo {
            remaining: Some(0),
            reset_at: DateTime::from_timestamp(1_700_000_000 + 7200, 0),
        };

        assert_eq!(retry_delay(&info, now), MAX_RATE_LIMIT_WAIT);
    }

    #[test]
    fn test_client_new_without_token() {
        let client = Client::new(None, "https://api.github.com").unwrap();
        assert_eq!(client.base_url(), "https://api.github.com");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_client_new_with_token() {
        let client = Client::new(Some("test_token"), "https://api.github.com").unwrap();
        assert!(client.is_authenticated());
    }
}
