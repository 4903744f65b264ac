// Error types for venue-scout.
// Location, search, and cache failures plus the top-level application error.

use std::fmt;

use thiserror::Error;

/// Why a one-shot position reading failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationFailure {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
}

impl fmt::Display for LocationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationFailure::PermissionDenied => write!(f, "permission denied"),
            LocationFailure::PositionUnavailable => write!(f, "position unavailable"),
            LocationFailure::Timeout => write!(f, "timed out"),
        }
    }
}

/// Failure reported by a Geo Locator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Location error ({reason}): {message}")]
pub struct LocationError {
    pub reason: LocationFailure,
    pub message: String,
}

impl LocationError {
    pub fn new(reason: LocationFailure, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
        }
    }
}

/// Failure from either external search service.
///
/// `status` is `None` when no HTTP response was received at all, or when a
/// response arrived but its body could not be decoded (`malformed`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchError {
    pub status: Option<u16>,
    pub message: String,
    pub malformed: bool,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "Search service returned HTTP {}: {}", code, self.message),
            None if self.malformed => {
                write!(f, "Search service sent an unreadable response: {}", self.message)
            }
            None => write!(f, "Search service unreachable: {}", self.message),
        }
    }
}

impl std::error::Error for SearchError {}

impl SearchError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
            malformed: false,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            malformed: false,
        }
    }

    /// A 2xx response whose body did not match the expected shape.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            malformed: true,
        }
    }

    fn classify(status: Option<u16>, is_decode: bool, message: String) -> Self {
        match status {
            Some(code) => Self::http(code, message),
            None if is_decode => Self::malformed(message),
            None => Self::network(message),
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::classify(err.status().map(|s| s.as_u16()), err.is_decode(), err.to_string())
    }
}

/// A durable cache entry that could not be read back.
/// Never leaves the cache module; the entry is dropped and treated as a miss.
#[derive(Error, Debug)]
pub(crate) enum CacheCorruptionError {
    #[error("malformed cache entry: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unreadable cache entry: {0}")]
    Io(#[from] std::io::Error),
}

/// Error carried by a failed query in the published search state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Application-level error for setup and plumbing outside a published query.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error(transparent)]
    Location(#[from] LocationError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No cache directory available on this platform")]
    NoCacheDir,
}

pub type Result<T> = std::result::Result<T, ScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_display() {
        let err = SearchError::http(503, "maintenance");
        assert_eq!(
            err.to_string(),
            "Search service returned HTTP 503: maintenance"
        );

        let err = SearchError::network("connection refused");
        assert_eq!(err.to_string(), "Search service unreachable: connection refused");

        let err = SearchError::malformed("missing field `results`");
        assert_eq!(
            err.to_string(),
            "Search service sent an unreadable response: missing field `results`"
        );
    }

    #[test]
    fn test_decode_failure_is_not_reported_as_unreachable() {
        let err = SearchError::classify(None, true, "expected value at line 1".into());
        assert!(err.malformed);
        assert_eq!(err.status, None);
        assert!(!err.to_string().contains("unreachable"));

        let err = SearchError::classify(None, false, "connection reset".into());
        assert_eq!(err, SearchError::network("connection reset"));

        let err = SearchError::classify(Some(404), false, "not found".into());
        assert_eq!(err, SearchError::http(404, "not found"));
    }

    #[test]
    fn test_location_error_display() {
        let err = LocationError::new(LocationFailure::Timeout, "no fix after 10s");
        assert_eq!(err.to_string(), "Location error (timed out): no fix after 10s");
    }

    #[test]
    fn test_query_error_is_transparent() {
        let err: QueryError = SearchError::http(500, "boom").into();
        assert_eq!(err.to_string(), "Search service returned HTTP 500: boom");
    }
}
