//! # Excelsior Core
//!
//! Shared types for the Excelsior Marvel Comics API client.
//!
//! This crate provides:
//! - A closed [`error::ErrorKind`] taxonomy for classifying call failures
//! - The [`error::ApiError`] value propagated to callers
//! - Status-code classification and kind-specific default messages
//!
//! Transport, signing, and retry live in `excelsior-gateway`; this crate is
//! deliberately dependency-light so endpoint collaborators can match on
//! error kinds without pulling in an HTTP stack.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

/// Error taxonomy and typed API errors
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{ApiError, ErrorKind};
}
