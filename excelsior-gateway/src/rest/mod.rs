//! REST client infrastructure.
//!
//! This module provides the full execution pipeline for one logical call:
//! - Per-attempt request signing (`ts` + `apikey` + `hash` query triplet)
//! - Bounded exponential-backoff retry for transient failures
//! - JSON decoding, typed or raw
//! - Status-code classification into typed errors
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
//! let spec = RequestSpec::get("/v1/public/characters")
//!     .param("nameStartsWith", "Spider")
//!     .limit(10);
//! let body: serde_json::Value = client.execute_raw(&spec).await?;
//! ```

mod client;
mod config;
mod request;
mod retry;
mod signer;

pub use client::RestClient;
pub use config::{RestConfig, RestConfigBuilder};
pub use request::RequestSpec;
pub use retry::RetryPolicy;
pub use signer::{Credentials, RequestSigner, SignedParams};
