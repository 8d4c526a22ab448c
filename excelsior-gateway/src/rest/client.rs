//! REST client: signing, transport, parsing, and error translation.

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use excelsior_core::error::{ApiError, ErrorKind};

use super::config::RestConfig;
use super::request::RequestSpec;
use super::retry::RetryPolicy;
use super::signer::RequestSigner;

/// Executes logical calls against the catalog API.
///
/// One attempt is the whole sign + send + parse closure; the retry loop
/// re-invokes it from scratch, so every retry carries a fresh signature.
/// All methods take `&self` and keep no per-call state, so any number of
/// calls may run concurrently on one instance.
///
/// # Example
///
/// ```ignore
/// use excelsior_gateway::rest::{RequestSpec, RestClient, RestConfig};
///
/// let config = RestConfig::builder()
///     .public_key("my_public_key")
///     .private_key("my_private_key")
///     .build();
///
/// let client = RestClient::new(config)?;
/// let spec = RequestSpec::get("/v1/public/comics").limit(20);
/// let body: serde_json::Value = client.execute_raw(&spec).await?;
/// ```
pub struct RestClient {
    config: RestConfig,
    http_client: Client,
    signer: Option<RequestSigner>,
    retry: RetryPolicy,
}

impl RestClient {
    /// Creates a new REST client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a network-kind [`ApiError`] if the HTTP client cannot be
    /// built (invalid header names or values in the config).
    pub fn new(config: RestConfig) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::USER_AGENT,
            config
                .user_agent
                .parse()
                .map_err(|_| ApiError::transport("Invalid user agent"))?,
        );

        for (key, value) in &config.headers {
            headers.insert(
                header::HeaderName::try_from(key.as_str())
                    .map_err(|_| ApiError::transport(format!("Invalid header name: {key}")))?,
                value
                    .parse()
                    .map_err(|_| ApiError::transport(format!("Invalid header value for {key}")))?,
            );
        }

        let http_client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::transport(format!("Failed to create HTTP client: {e}")))?;

        let signer = config.credentials().map(RequestSigner::new);
        let retry = config.retry_policy();

        Ok(Self {
            config,
            http_client,
            signer,
            retry,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    /// Returns the signer if credentials are configured.
    #[must_use]
    pub fn signer(&self) -> Option<&RequestSigner> {
        self.signer.as_ref()
    }

    /// Builds the full URL for a path.
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
        }
    }

    /// Executes a call and decodes the response into `T`.
    ///
    /// Transient failures are retried per the configured policy; every
    /// attempt is signed anew. A body that is valid JSON but does not match
    /// `T` fails with message `"Failed to parse response into model"` and
    /// the offending payload in `response_body`.
    pub async fn execute<T: DeserializeOwned>(&self, spec: &RequestSpec) -> Result<T, ApiError> {
        self.retry.run(|| self.attempt::<T>(spec)).await
    }

    /// Executes a call and returns the raw decoded JSON value.
    pub async fn execute_raw(&self, spec: &RequestSpec) -> Result<Value, ApiError> {
        self.retry
            .run(|| async { self.attempt_parsed(spec).await.map(|(_, value)| value) })
            .await
    }

    async fn attempt<T: DeserializeOwned>(&self, spec: &RequestSpec) -> Result<T, ApiError> {
        let (status, value) = self.attempt_parsed(spec).await?;

        serde_json::from_value(value.clone()).map_err(|_| {
            ApiError::model_decode(status, value.to_string())
                .with_request_context(spec.describe())
        })
    }

    /// One full attempt: sign, send, classify, parse.
    async fn attempt_parsed(&self, spec: &RequestSpec) -> Result<(u16, Value), ApiError> {
        let mut params: Vec<(String, String)> = spec.query_params().to_vec();

        // Signed keys win over caller-supplied keys of the same name.
        if let Some(signer) = &self.signer {
            let signed = signer.sign().pairs();
            params.retain(|(key, _)| !signed.iter().any(|(sk, _)| sk == key));
            params.extend(signed);
        }

        let url = self.build_url(spec.path());

        debug!(
            method = %spec.method(),
            url = %url,
            "Sending request"
        );

        let response = self
            .http_client
            .request(spec.method().clone(), &url)
            .query(&params)
            .send()
            .await
            .map_err(|e| Self::transport_error(&e).with_request_context(spec.describe()))?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let body = response
            .text()
            .await
            .map_err(|e| Self::transport_error(&e).with_request_context(spec.describe()))?;

        if !(200..300).contains(&status) {
            return Err(Self::status_error(status, retry_after, &body, spec));
        }

        let value = serde_json::from_str(&body).map_err(|_| {
            ApiError::json_parse(status, body).with_request_context(spec.describe())
        })?;

        Ok((status, value))
    }

    /// Translates a pre-response transport failure into a network error.
    fn transport_error(error: &reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::timeout()
        } else if error.is_connect() {
            ApiError::connection()
        } else {
            ApiError::transport(error.to_string())
        }
    }

    /// Classifies a non-2xx response, harvesting whatever detail the error
    /// body carries.
    fn status_error(
        status: u16,
        retry_after: Option<u64>,
        body: &str,
        spec: &RequestSpec,
    ) -> ApiError {
        let parsed: Option<Value> = serde_json::from_str(body).ok();

        // Marvel error bodies carry the detail under "message" or "status".
        let message = parsed
            .as_ref()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("status"))
                    .and_then(Value::as_str)
            })
            .map(str::to_string);

        let response_body = (!body.is_empty()).then(|| body.to_string());
        let mut error =
            ApiError::from_status(status, message, response_body, Some(spec.describe()));

        match error.kind {
            ErrorKind::RateLimit => {
                if let Some(seconds) = retry_after {
                    error = error.with_retry_after(seconds);
                }
            }
            ErrorKind::Validation => {
                let messages: Option<Vec<String>> = parsed.as_ref().and_then(|v| {
                    v.get("errors").and_then(Value::as_array).map(|entries| {
                        entries
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                });
                if let Some(messages) = messages.filter(|m: &Vec<String>| !m.is_empty()) {
                    error = error.with_validation_messages(messages);
                }
            }
            _ => {}
        }

        error
    }
}
