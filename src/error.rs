//! Error types for the Bandwidth API SDK.
//!
//! This module contains the error type raised while configuring the SDK and
//! while building the API namespace from a schema catalog.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Construction errors are never recovered internally.
//!
//! # Example
//!
//! ```rust
//! use bandwidth_api::{ApiToken, ConfigError};
//!
//! let result = ApiToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API token cannot be empty.
    #[error("API token cannot be empty. Please provide a valid Bandwidth API token.")]
    EmptyApiToken,

    /// API secret cannot be empty.
    #[error("API secret cannot be empty. Please provide a valid Bandwidth API secret.")]
    EmptyApiSecret,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme (e.g., 'https://api.example.com/v1').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// An action descriptor in the schema catalog breaks its invariants.
    #[error("Invalid action '{resource}.{action}': {reason}")]
    InvalidActionSpec {
        /// The resource the action belongs to.
        resource: String,
        /// The action name.
        action: String,
        /// What is wrong with the descriptor.
        reason: String,
    },

    /// The schema catalog could not be parsed.
    #[error("Invalid schema catalog: {reason}")]
    InvalidCatalog {
        /// The parser error message.
        reason: String,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClient {
        /// The transport error message.
        reason: String,
    },
}
