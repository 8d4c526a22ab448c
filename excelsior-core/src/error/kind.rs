//! The closed set of failure categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category of a failed API call, independent of the exact status
/// code that produced it.
///
/// The set is closed: every HTTP status maps to exactly one kind, and
/// transport failures that never reach a status map to [`ErrorKind::Network`].
///
/// # Examples
///
/// ```
/// use excelsior_core::error::ErrorKind;
///
/// assert_eq!(ErrorKind::from_status(429), ErrorKind::RateLimit);
/// assert!(ErrorKind::RateLimit.is_retryable());
/// assert!(!ErrorKind::NotFound.is_retryable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Credentials were rejected (HTTP 401).
    Authentication,
    /// The requested resource does not exist (HTTP 404).
    NotFound,
    /// The request parameters were rejected (HTTP 400).
    Validation,
    /// The rate limit was exceeded (HTTP 429).
    RateLimit,
    /// The remote service failed (HTTP 5xx).
    ServerError,
    /// The request never produced a status code: timeout, connection
    /// failure, or another transport-level fault.
    Network,
    /// Any status code outside the mapped set.
    Unknown,
}

impl ErrorKind {
    /// Classifies an HTTP status code into an error kind.
    ///
    /// Deterministic and total: every `u16` maps to exactly one kind.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Authentication,
            404 => Self::NotFound,
            400 => Self::Validation,
            429 => Self::RateLimit,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Returns true if the retry loop re-attempts failures of this kind by
    /// default.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ServerError | Self::RateLimit | Self::Network)
    }

    /// Returns the default message attached when a failure of this kind is
    /// built without an explicit message.
    #[must_use]
    pub const fn default_message(&self) -> &'static str {
        match self {
            Self::Authentication => "Authentication failed",
            Self::NotFound => "Resource not found",
            Self::Validation => "Validation failed",
            Self::RateLimit => "Rate limit exceeded",
            Self::ServerError => "Server error occurred",
            Self::Network => "Network error occurred",
            Self::Unknown => "Marvel API error occurred",
        }
    }

    /// Returns the kind as a static string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::RateLimit => "rate_limit",
            Self::ServerError => "server_error",
            Self::Network => "network",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
