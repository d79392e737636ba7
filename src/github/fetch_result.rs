use std::sync::Arc;

/// Outcome of one remote fetch.
///
/// Fetchers never fail with a bare error; callers that only want "data or
/// nothing" flatten with [`FetchResult::or_default`], while tests and detail
/// reports can still tell an outage apart from genuinely empty data.
#[derive(Debug, Clone)]
pub enum FetchResult<T> {
    /// The fetch succeeded and the full result is present.
    Found(T),

    /// The requested account or resource does not exist upstream.
    NotFound,

    /// Throttling cut the fetch short; whatever was gathered is present.
    Partial(T),

    /// The fetch was skipped or abandoned, with the reason why
    /// (e.g. no access token configured).
    Unavailable(String),

    /// The fetch failed.
    Error(Arc<ohno::AppError>),
}

impl<T> FetchResult<T> {
    /// Returns `true` if the result is `Found`.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Converts this result into an `Option`, returning `Some` only for `Found`.
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Found(data) => Some(data),
            _ => None,
        }
    }

    /// Returns a string describing the status of this result.
    #[must_use]
    pub const fn status_str(&self) -> &'static str {
        match self {
            Self::Found(_) => "Found",
            Self::NotFound => "NotFound",
            Self::Partial(_) => "Partial",
            Self::Unavailable(_) => "Unavailable",
            Self::Error(_) => "Error",
        }
    }
}

impl<T: Default> FetchResult<T> {
    /// Flatten to plain data: `Found` and `Partial` yield their payload,
    /// everything else the type's default. This is the "degrade to empty"
    /// boundary the rendering layer relies on.
    #[must_use]
    pub fn or_default(self) -> T {
        match self {
            Self::Found(data) | Self::Partial(data) => data,
            Self::NotFound | Self::Unavailable(_) | Self::Error(_) => T::default(),
        }
    }
}
