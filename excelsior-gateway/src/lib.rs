//! # Excelsior Gateway
//!
//! Network execution pipeline for the Excelsior Marvel Comics API client.
//!
//! This crate provides:
//! - REST client with per-attempt request signing
//! - Bounded exponential-backoff retry for transient failures
//! - Status-code classification into typed [`excelsior_core::error::ApiError`]s
//!
//! # Architecture
//!
//! The gateway is organized around one module:
//! - `rest` - request spec, signer, retry policy, and the executing client
//!
//! Endpoint wrappers (comics, characters, creators, ...) live above this
//! crate; they build a [`rest::RequestSpec`] and hand it to
//! [`rest::RestClient::execute`].
//!
//! # Example
//!
//! ```ignore
//! use excelsior_gateway::rest::{RequestSpec, RestClient, RestConfig};
//!
//! let config = RestConfig::builder()
//!     .public_key("my_public_key")
//!     .private_key("my_private_key")
//!     .build();
//!
//! let client = RestClient::new(config)?;
//! let spec = RequestSpec::get("/v1/public/comics").limit(20);
//! let comics: serde_json::Value = client.execute_raw(&spec).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

/// REST client infrastructure
pub mod rest;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::rest::{
        Credentials, RequestSigner, RequestSpec, RestClient, RestConfig, RestConfigBuilder,
        RetryPolicy, SignedParams,
    };
    pub use excelsior_core::error::{ApiError, ErrorKind};
}
