//! Request specification built by endpoint collaborators.

use reqwest::Method;

/// Method, path, and query description of one logical call, independent of
/// authentication.
///
/// Endpoint wrappers build a spec from their typed filters, emitting only
/// the filters that are actually present; the executor stays
/// filter-agnostic. A spec is consumed once per logical call but re-signed
/// on every retry attempt.
///
/// # Example
///
/// ```
/// use excelsior_gateway::rest::RequestSpec;
///
/// let spec = RequestSpec::get("/v1/public/comics")
///     .param("format", "comic")
///     .param_opt("titleStartsWith", Some("Amazing"))
///     .param_opt::<String>("dateDescriptor", None)
///     .limit(20)
///     .offset(40);
///
/// assert_eq!(spec.query_params().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    method: Method,
    path: String,
    query_params: Vec<(String, String)>,
}

impl RequestSpec {
    /// Creates a spec for the given method and path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query_params: Vec::new(),
        }
    }

    /// Creates a GET spec; the catalog API is read-only in practice.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    /// Adds a query parameter only when the value is present.
    ///
    /// This is how optional endpoint filters reach the wire: absent filters
    /// produce no query entry at all.
    #[must_use]
    pub fn param_opt<T: ToString>(mut self, key: impl Into<String>, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.query_params.push((key.into(), value.to_string()));
        }
        self
    }

    /// Adds multiple query parameters.
    #[must_use]
    pub fn params(mut self, params: &[(&str, &str)]) -> Self {
        for (key, value) in params {
            self.query_params
                .push(((*key).to_string(), (*value).to_string()));
        }
        self
    }

    /// Sets the page size for paginated listings.
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit.to_string())
    }

    /// Sets the page offset for paginated listings.
    #[must_use]
    pub fn offset(self, offset: u32) -> Self {
        self.param("offset", offset.to_string())
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the caller-supplied query parameters.
    #[must_use]
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query_params
    }

    /// Returns a short description for logs and error context,
    /// e.g. `"GET /v1/public/comics"`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_spec() {
        let spec = RequestSpec::get("/v1/public/comics");
        assert_eq!(spec.method(), &Method::GET);
        assert_eq!(spec.path(), "/v1/public/comics");
        assert!(spec.query_params().is_empty());
    }

    #[test]
    fn test_absent_filters_emit_nothing() {
        let spec = RequestSpec::get("/v1/public/characters")
            .param_opt("nameStartsWith", Some("Spider"))
            .param_opt::<u32>("series", None)
            .param_opt::<u32>("events", None);

        assert_eq!(
            spec.query_params(),
            &[("nameStartsWith".to_string(), "Spider".to_string())]
        );
    }

    #[test]
    fn test_paging_helpers() {
        let spec = RequestSpec::get("/v1/public/comics").limit(20).offset(40);

        assert_eq!(
            spec.query_params(),
            &[
                ("limit".to_string(), "20".to_string()),
                ("offset".to_string(), "40".to_string()),
            ]
        );
    }

    #[test]
    fn test_params_batch() {
        let spec = RequestSpec::get("/v1/public/comics")
            .params(&[("format", "comic"), ("noVariants", "true")]);

        assert_eq!(spec.query_params().len(), 2);
    }

    #[test]
    fn test_describe() {
        let spec = RequestSpec::get("/v1/public/comics/1234");
        assert_eq!(spec.describe(), "GET /v1/public/comics/1234");
    }
}
