//! HTTP transport

use crate::error::ApiError;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

/// HTTP verb of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    /// Verb as sent on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request against the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb
    pub method: Method,
    /// Path relative to the base URL
    pub path: String,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl ApiRequest {
    /// GET `path`
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    /// POST `body` to `path`
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    /// PUT `body` to `path`
    #[must_use]
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: Some(body),
        }
    }

    /// DELETE `path`
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// Sends requests and returns the decoded JSON body
///
/// Implementations perform exactly one call per `request` and never retry.
/// The HTTP implementation is [`HttpTransport`]; tests use an in-memory one.
pub trait Transport: Send + Sync {
    /// Perform `request`
    ///
    /// An empty success body yields `Value::Null`.
    fn request(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ApiError>> + Send + '_>>;
}

/// Base URL and credentials for one backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every request path is joined onto
    pub base_url: String,
    /// Bearer token; when unset no `Authorization` header is sent
    pub token: Option<String>,
    /// Value of the `API-KEY` header; when unset the header is not sent
    pub api_key: Option<String>,
}

impl ApiConfig {
    /// Config for `base_url` without credentials
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            api_key: None,
        }
    }

    /// Set the bearer token
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    /// Absolute URL for a relative `path`
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    config: ApiConfig,
}

impl HttpTransport {
    /// Create a transport for `config`
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// The config this transport was built with
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn perform(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.config.url(&request.path);
        tracing::debug!(method = %request.method, path = %request.path, "Sending API request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        if let Some(api_key) = &self.config.api_key {
            builder = builder.header("API-KEY", api_key);
        }
        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Transport for HttpTransport {
    fn request(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ApiError>> + Send + '_>> {
        Box::pin(async move {
            let method = request.method;
            let path = request.path.clone();
            metrics::counter!("api.requests.total", "method" => method.as_str()).increment(1);

            let start = Instant::now();
            let result = self.perform(request).await;
            metrics::histogram!("api.request.duration_seconds").record(start.elapsed().as_secs_f64());

            if let Err(error) = &result {
                tracing::warn!(method = %method, path = %path, error = %error, "API request failed");
                metrics::counter!("api.requests.failed", "kind" => error.kind_label()).increment(1);
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = ApiConfig::new("https://example.test/api/");
        assert_eq!(config.url("films"), "https://example.test/api/films");
        assert_eq!(config.url("/films"), "https://example.test/api/films");

        let config = ApiConfig::new("https://example.test/api/1.1");
        assert_eq!(config.url("/todo-lists"), "https://example.test/api/1.1/todo-lists");
    }

    #[test]
    fn test_empty_credentials_are_ignored() {
        let config = ApiConfig::new("https://example.test")
            .with_token(Some(String::new()))
            .with_api_key(None);
        assert!(config.token.is_none());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_request_constructors() {
        let request = ApiRequest::post("/todo-lists", json!({ "title": "Groceries" }));
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body, Some(json!({ "title": "Groceries" })));

        let request = ApiRequest::delete("/todo-lists/1");
        assert_eq!(request.method.as_str(), "DELETE");
        assert!(request.body.is_none());
    }
}
