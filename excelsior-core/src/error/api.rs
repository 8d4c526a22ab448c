//! The typed error value surfaced to callers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ErrorKind;

/// Typed error for a failed Marvel API call.
///
/// A single tagged-union type rather than one error class per status
/// family: the [`ErrorKind`] discriminant is what callers branch on, and
/// the kind-specific fields (`retry_after_seconds` for rate limits,
/// `validation_messages` for validation failures, `resource_type` /
/// `resource_id` for missing resources) are populated only when relevant.
///
/// The textual form includes the status code when one is known:
/// `"{message} (Status: {code})"`.
///
/// # Examples
///
/// ```
/// use excelsior_core::error::{ApiError, ErrorKind};
///
/// let error = ApiError::from_status(401, None, None, None);
/// assert_eq!(error.to_string(), "Authentication failed (Status: 401)");
/// assert!(!error.is_retryable());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{}", render(.message, .status_code))]
pub struct ApiError {
    /// Semantic category of the failure.
    pub kind: ErrorKind,

    /// Human-readable description.
    pub message: String,

    /// HTTP status code, when the failure produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// Raw response body, kept for diagnostics when the body could not be
    /// decoded or carried error detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,

    /// Description of the request that failed, e.g. `"GET /v1/public/comics"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_context: Option<String>,

    /// Seconds to wait before retrying, for rate-limit failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u64>,

    /// Individual validation failures, for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_messages: Option<Vec<String>>,

    /// Resource type the caller asked for, for not-found failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Resource identifier the caller asked for, for not-found failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

fn render(message: &str, status_code: &Option<u16>) -> String {
    match status_code {
        Some(code) => format!("{message} (Status: {code})"),
        None => message.to_string(),
    }
}

impl ApiError {
    /// Creates an error of the given kind with an explicit message and no
    /// further detail.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            response_body: None,
            request_context: None,
            retry_after_seconds: None,
            validation_messages: None,
            resource_type: None,
            resource_id: None,
        }
    }

    /// Builds an error from an HTTP status code.
    ///
    /// The kind is classified from the status; when `message` is `None` the
    /// kind-specific default is used.
    #[must_use]
    pub fn from_status(
        status: u16,
        message: Option<String>,
        response_body: Option<String>,
        request_context: Option<String>,
    ) -> Self {
        let kind = ErrorKind::from_status(status);
        let message = message.unwrap_or_else(|| kind.default_message().to_string());

        Self {
            status_code: Some(status),
            response_body,
            request_context,
            ..Self::new(kind, message)
        }
    }

    /// Builds a network error for a request that timed out.
    #[must_use]
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Network, "Request timeout")
    }

    /// Builds a network error for a connection that could not be
    /// established.
    #[must_use]
    pub fn connection() -> Self {
        Self::new(ErrorKind::Network, "Connection error")
    }

    /// Builds a network error for any other transport failure, carrying the
    /// underlying failure's text.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, reason)
    }

    /// Builds an error for a successful transport response whose body was
    /// not valid JSON.
    ///
    /// The original status code is kept and the raw response text is stored
    /// in `response_body`.
    #[must_use]
    pub fn json_parse(status: u16, raw_body: impl Into<String>) -> Self {
        Self {
            status_code: Some(status),
            response_body: Some(raw_body.into()),
            ..Self::new(ErrorKind::from_status(status), "Failed to parse JSON response")
        }
    }

    /// Builds an error for a JSON response that did not match the expected
    /// typed shape.
    ///
    /// The parsed (but structurally invalid) payload is stored in
    /// `response_body`.
    #[must_use]
    pub fn model_decode(status: u16, payload: impl Into<String>) -> Self {
        Self {
            status_code: Some(status),
            response_body: Some(payload.into()),
            ..Self::new(
                ErrorKind::from_status(status),
                "Failed to parse response into model",
            )
        }
    }

    /// Attaches a rate-limit retry hint.
    #[must_use]
    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after_seconds = Some(seconds);
        self
    }

    /// Attaches individual validation failure messages.
    #[must_use]
    pub fn with_validation_messages(mut self, messages: Vec<String>) -> Self {
        self.validation_messages = Some(messages);
        self
    }

    /// Attaches the resource the caller asked for.
    #[must_use]
    pub fn with_resource(
        mut self,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        self.resource_type = Some(resource_type.into());
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Attaches the request description for diagnostics.
    #[must_use]
    pub fn with_request_context(mut self, context: impl Into<String>) -> Self {
        self.request_context = Some(context.into());
        self
    }

    /// Returns true if the retry loop re-attempts this error by default.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
