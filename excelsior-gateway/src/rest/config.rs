//! REST client configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use super::retry::RetryPolicy;
use super::signer::Credentials;

/// Configuration for the REST client.
///
/// All knobs are bound once at construction; client instances built from
/// different configs are fully isolated from one another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Base URL for API requests.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Public API key, sent as the `apikey` query parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// Private API key used for request signing. Never serialized.
    #[serde(skip_serializing, skip_deserializing)]
    pub private_key: Option<String>,

    /// Per-attempt request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum retry attempts after the initial one.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Maximum retry delay in milliseconds.
    #[serde(default = "default_max_retry_delay_ms")]
    pub max_retry_delay_ms: u64,

    /// Backoff multiplier applied after each retry.
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: f64,

    /// Additional headers to include in every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://gateway.marvel.com".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1_000
}

fn default_max_retry_delay_ms() -> u64 {
    60_000
}

fn default_backoff_factor() -> f64 {
    2.0
}

fn default_user_agent() -> String {
    format!("Excelsior/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            public_key: None,
            private_key: None,
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            max_retry_delay_ms: default_max_retry_delay_ms(),
            backoff_factor: default_backoff_factor(),
            headers: HashMap::new(),
            user_agent: default_user_agent(),
        }
    }
}

impl RestConfig {
    /// Creates a new builder for `RestConfig`.
    #[must_use]
    pub fn builder() -> RestConfigBuilder {
        RestConfigBuilder::default()
    }

    /// Returns the per-attempt timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the initial retry delay as a Duration.
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Returns the maximum retry delay as a Duration.
    #[must_use]
    pub fn max_retry_delay(&self) -> Duration {
        Duration::from_millis(self.max_retry_delay_ms)
    }

    /// Builds the retry policy described by this configuration.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new()
            .with_max_retries(self.max_retries)
            .with_base_delay(self.retry_delay())
            .with_max_delay(self.max_retry_delay())
            .with_backoff_factor(self.backoff_factor)
    }

    /// Returns the configured credentials, when both keys are present.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.public_key, &self.private_key) {
            (Some(public), Some(private)) => Some(Credentials::new(public, private)),
            _ => None,
        }
    }

    /// Returns whether the client has a full key pair configured.
    #[must_use]
    pub fn has_auth(&self) -> bool {
        self.public_key.is_some() && self.private_key.is_some()
    }
}

/// Builder for `RestConfig`.
#[derive(Debug, Default)]
pub struct RestConfigBuilder {
    base_url: Option<String>,
    public_key: Option<String>,
    private_key: Option<String>,
    timeout_ms: Option<u64>,
    max_retries: Option<u32>,
    retry_delay_ms: Option<u64>,
    max_retry_delay_ms: Option<u64>,
    backoff_factor: Option<f64>,
    headers: HashMap<String, String>,
    user_agent: Option<String>,
}

impl RestConfigBuilder {
    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the public API key.
    #[must_use]
    pub fn public_key(mut self, key: impl Into<String>) -> Self {
        self.public_key = Some(key.into());
        self
    }

    /// Sets the private API key.
    #[must_use]
    pub fn private_key(mut self, key: impl Into<String>) -> Self {
        self.private_key = Some(key.into());
        self
    }

    /// Sets the per-attempt request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    /// Sets the maximum retry attempts.
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Sets the initial retry delay.
    #[must_use]
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay_ms = Some(delay.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    /// Sets the maximum retry delay.
    #[must_use]
    pub fn max_retry_delay(mut self, delay: Duration) -> Self {
        self.max_retry_delay_ms = Some(delay.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    /// Sets the backoff multiplier.
    #[must_use]
    pub fn backoff_factor(mut self, factor: f64) -> Self {
        self.backoff_factor = Some(factor);
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the `RestConfig`.
    #[must_use]
    pub fn build(self) -> RestConfig {
        RestConfig {
            base_url: self.base_url.unwrap_or_else(default_base_url),
            public_key: self.public_key,
            private_key: self.private_key,
            timeout_ms: self.timeout_ms.unwrap_or_else(default_timeout_ms),
            max_retries: self.max_retries.unwrap_or_else(default_max_retries),
            retry_delay_ms: self.retry_delay_ms.unwrap_or_else(default_retry_delay_ms),
            max_retry_delay_ms: self
                .max_retry_delay_ms
                .unwrap_or_else(default_max_retry_delay_ms),
            backoff_factor: self.backoff_factor.unwrap_or_else(default_backoff_factor),
            headers: self.headers,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = RestConfig::default();

        assert_eq!(config.base_url, "https://gateway.marvel.com");
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_ms, 1_000);
        assert_eq!(config.max_retry_delay_ms, 60_000);
        assert!(!config.has_auth());
    }

    #[test]
    fn test_config_builder() {
        let config = RestConfig::builder()
            .base_url("https://gateway.example.com")
            .public_key("pub")
            .private_key("priv")
            .timeout(Duration::from_secs(15))
            .max_retries(5)
            .build();

        assert_eq!(config.base_url, "https://gateway.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.max_retries, 5);
        assert!(config.has_auth());
        assert!(config.credentials().is_some());
    }

    #[test]
    fn test_credentials_require_both_keys() {
        let config = RestConfig::builder().public_key("pub").build();

        assert!(!config.has_auth());
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = RestConfig::builder().max_retries(7).build();
        let policy = config.retry_policy();

        assert_eq!(policy.max_retries(), 7);
    }

    #[test]
    fn test_private_key_never_serialized() {
        let config = RestConfig::builder()
            .public_key("pub")
            .private_key("secret")
            .build();

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("pub"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = RestConfig::builder()
            .base_url("https://gateway.example.com")
            .timeout(Duration::from_secs(20))
            .build();

        let json = serde_json::to_string(&config).unwrap();
        let parsed: RestConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.base_url, parsed.base_url);
        assert_eq!(config.timeout_ms, parsed.timeout_ms);
        assert_eq!(config.max_retries, parsed.max_retries);
    }
}
