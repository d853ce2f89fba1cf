//! Configuration types for the Bandwidth API SDK.
//!
//! This module provides the configuration used to build an API namespace
//! and authenticate every request it sends.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiConfig`]: The main configuration struct holding all SDK settings
//! - [`ApiConfigBuilder`]: A builder for constructing [`ApiConfig`] instances
//! - [`ApiToken`]: A validated API token newtype
//! - [`ApiSecret`]: A validated API secret newtype with masked debug output
//! - [`BaseUrl`]: A validated API base URL
//!
//! # Example
//!
//! ```rust
//! use bandwidth_api::{ApiConfig, ApiToken, ApiSecret};
//!
//! let config = ApiConfig::builder()
//!     .api_token(ApiToken::new("token").unwrap())
//!     .api_secret(ApiSecret::new("secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), bandwidth_api::config::DEFAULT_BASE_URL);
//! ```

mod newtypes;

pub use newtypes::{ApiSecret, ApiToken, BaseUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.catapult.inetwork.com/v1";

/// Header carrying the rate-limit reset time on 429 responses.
pub const DEFAULT_RATE_LIMIT_RESET_HEADER: &str = "X-RateLimit-Reset";

/// Configuration for the Bandwidth API SDK.
///
/// Holds the credentials and transport settings shared by every action of
/// one API namespace.
///
/// # Thread Safety
///
/// `ApiConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks. It is immutable once built.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use bandwidth_api::{ApiConfig, ApiToken, ApiSecret, BaseUrl};
///
/// let config = ApiConfig::builder()
///     .base_url(BaseUrl::new("https://api.example.com/v2").unwrap())
///     .api_token(ApiToken::new("token").unwrap())
///     .api_secret(ApiSecret::new("secret").unwrap())
///     .timeout(Duration::from_secs(30))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
/// ```
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: BaseUrl,
    api_token: ApiToken,
    api_secret: ApiSecret,
    rate_limit_reset_header: String,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Returns the base URL every action path is appended to.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API token (HTTP Basic username).
    #[must_use]
    pub const fn api_token(&self) -> &ApiToken {
        &self.api_token
    }

    /// Returns the API secret (HTTP Basic password).
    #[must_use]
    pub const fn api_secret(&self) -> &ApiSecret {
        &self.api_secret
    }

    /// Returns the name of the header read on 429 responses.
    #[must_use]
    pub fn rate_limit_reset_header(&self) -> &str {
        &self.rate_limit_reset_header
    }

    /// Returns the per-request transport timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};

/// Builder for constructing [`ApiConfig`] instances.
///
/// Required fields are `api_token` and `api_secret`.
///
/// # Defaults
///
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `rate_limit_reset_header`: [`DEFAULT_RATE_LIMIT_RESET_HEADER`]
/// - `timeout`: `None` (transport default)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<BaseUrl>,
    api_token: Option<ApiToken>,
    api_secret: Option<ApiSecret>,
    rate_limit_reset_header: Option<String>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API token (required).
    #[must_use]
    pub fn api_token(mut self, token: ApiToken) -> Self {
        self.api_token = Some(token);
        self
    }

    /// Sets the API secret (required).
    #[must_use]
    pub fn api_secret(mut self, secret: ApiSecret) -> Self {
        self.api_secret = Some(secret);
        self
    }

    /// Overrides the header read for the rate-limit reset time.
    #[must_use]
    pub fn rate_limit_reset_header(mut self, header: impl Into<String>) -> Self {
        self.rate_limit_reset_header = Some(header.into());
        self
    }

    /// Sets the per-request transport timeout.
    ///
    /// A request that exceeds it fails with a network error.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ApiConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_token` or
    /// `api_secret` are not set.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let api_token = self
            .api_token
            .ok_or(ConfigError::MissingRequiredField { field: "api_token" })?;
        let api_secret = self
            .api_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "api_secret",
            })?;
        let base_url = match self.base_url {
            Some(url) => url,
            None => BaseUrl::new(DEFAULT_BASE_URL)?,
        };

        Ok(ApiConfig {
            base_url,
            api_token,
            api_secret,
            rate_limit_reset_header: self
                .rate_limit_reset_header
                .unwrap_or_else(|| DEFAULT_RATE_LIMIT_RESET_HEADER.to_string()),
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
