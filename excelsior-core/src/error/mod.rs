//! Error types and classification for Marvel API calls.
//!
//! Every failure a caller can observe is an [`ApiError`] carrying an
//! [`ErrorKind`] discriminant plus kind-specific detail. Classification from
//! an HTTP status code happens exactly once, at the boundary where the
//! failure is first seen; everything above that boundary only handles typed
//! values.
//!
//! # Example
//!
//! ```
//! use excelsior_core::error::{ApiError, ErrorKind};
//!
//! let error = ApiError::from_status(404, None, None, None);
//! assert_eq!(error.kind, ErrorKind::NotFound);
//! assert_eq!(error.to_string(), "Resource not found (Status: 404)");
//! ```

mod api;
mod kind;

pub use api::ApiError;
pub use kind::ErrorKind;
