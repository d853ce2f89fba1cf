//! HTTP transport for Bandwidth API communication.
//!
//! This module provides the [`HttpClient`] type which sends an already built
//! [`HttpRequest`] and hands back the raw [`HttpResponse`]. It does not
//! classify responses and never retries.

use std::collections::HashMap;

use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::ApiConfig;
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Transport shared by every action of one API namespace.
///
/// The client adds the default headers (`User-Agent`, `Accept`) to every
/// request; everything else, credentials included, comes from the request.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use bandwidth_api::{ApiConfig, ApiToken, ApiSecret};
/// use bandwidth_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = ApiConfig::builder()
///     .api_token(ApiToken::new("token").unwrap())
///     .api_secret(ApiSecret::new("secret").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config)?;
/// let response = client
///     .send(&HttpRequest::new(HttpMethod::Get, "https://api.example.com/v1/calls"))
///     .await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new transport for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Bandwidth API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::HttpClient {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            default_headers,
        })
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request and returns the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns the [`reqwest::Error`] if no response was received
    /// (connection refused, DNS failure, timeout, invalid URL).
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, reqwest::Error> {
        tracing::debug!(method = %request.method, url = %request.url, "Sending request");

        let mut req_builder = self
            .client
            .request(request.method.into(), request.url.as_str());

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?;

        tracing::debug!(status = code, url = %request.url, "Received response");

        Ok(HttpResponse::new(code, headers, Some(body.to_vec())))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;
    use crate::config::{ApiSecret, ApiToken, BaseUrl};
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config() -> ApiConfig {
        ApiConfig::builder()
            .api_token(ApiToken::new("token").unwrap())
            .api_secret(ApiSecret::new("secret").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Bandwidth API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ApiConfig::builder()
            .api_token(ApiToken::new("token").unwrap())
            .api_secret(ApiSecret::new("secret").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("Bandwidth API Library"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }

    #[tokio::test]
    async fn test_send_returns_error_statuses_as_responses() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/error"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(400).insert_header("X-Request-Id", "req-9"))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(&create_test_config()).unwrap();
        let request = HttpRequest::new(HttpMethod::Get, format!("{}/error", mock_server.uri()));
        let response = client.send(&request).await.unwrap();

        assert_eq!(response.code, 400);
        assert!(response.body.is_none());
        assert_eq!(response.request_id(), Some("req-9"));
    }

    #[tokio::test]
    async fn test_send_times_out_as_transport_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let config = ApiConfig::builder()
            .base_url(BaseUrl::new(mock_server.uri()).unwrap())
            .api_token(ApiToken::new("token").unwrap())
            .api_secret(ApiSecret::new("secret").unwrap())
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();
        let request = HttpRequest::new(HttpMethod::Get, format!("{}/slow", mock_server.uri()));

        let error = client.send(&request).await.unwrap_err();
        assert!(error.is_timeout());
    }
}
