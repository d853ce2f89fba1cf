//! Error types raised while dispatching an API action.
//!
//! Every action invocation fails with exactly one [`ActionError`]:
//!
//! - [`ValidationError`]: Caller input was rejected before any network I/O
//! - [`RateLimitError`]: The server answered 429 and wants the caller to wait
//! - [`ApiError`]: Any other non-2xx response
//! - `Network`: The transport never produced a response
//!
//! Nothing here is retried by the SDK. Callers inspect the error and decide.
//!
//! # Example
//!
//! ```rust,ignore
//! use bandwidth_api::ActionError;
//!
//! match action.call(json!({"to": "+15551234567"})).await {
//!     Ok(output) => println!("Success: {:?}", output),
//!     Err(ActionError::RateLimited(e)) => {
//!         println!("Throttled until {:?}", e.reset_at());
//!     }
//!     Err(ActionError::Api(e)) => {
//!         println!("API error {}: {}", e.status, e.message);
//!     }
//!     Err(ActionError::Validation(e)) => println!("Bad input: {}", e),
//!     Err(ActionError::Network(e)) => println!("Network error: {}", e),
//! }
//! ```

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;

/// Which part of the request a validation failure belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputPart {
    /// A `{placeholder}` in the action path.
    Path,
    /// Fields sent as URL query parameters.
    Query,
    /// Fields sent in the JSON request body.
    Body,
}

impl fmt::Display for InputPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Query => write!(f, "query"),
            Self::Body => write!(f, "body"),
        }
    }
}

/// The rule a single field broke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// A required field was absent.
    Missing,
    /// The field was present with the wrong JSON type.
    WrongType {
        /// The type the schema expects (e.g., "string").
        expected: &'static str,
    },
    /// The field is not declared by a closed schema.
    Unknown,
    /// The input itself was not a JSON object.
    NotAnObject,
}

/// A single field-level validation failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldViolation {
    /// The offending field name (empty for whole-input failures).
    pub field: String,
    /// What was wrong with it.
    pub kind: ViolationKind,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "'{}' is required", self.field),
            ViolationKind::WrongType { expected } => {
                write!(f, "'{}' must be of type {expected}", self.field)
            }
            ViolationKind::Unknown => write!(f, "'{}' is not allowed", self.field),
            ViolationKind::NotAnObject => write!(f, "input must be an object"),
        }
    }
}

/// Error returned when caller input fails schema validation.
///
/// The request is aborted before anything is sent.
///
/// # Example
///
/// ```rust
/// use bandwidth_api::clients::{FieldViolation, InputPart, ValidationError, ViolationKind};
///
/// let error = ValidationError {
///     part: InputPart::Body,
///     violations: vec![FieldViolation {
///         field: "to".to_string(),
///         kind: ViolationKind::Missing,
///     }],
/// };
/// assert_eq!(error.to_string(), "Invalid body: 'to' is required");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Invalid {part}: {}", format_violations(.violations))]
pub struct ValidationError {
    /// The request part whose schema was violated.
    pub part: InputPart,
    /// Every violation found, in input order.
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Creates an error for a single violation.
    #[must_use]
    pub fn single(part: InputPart, field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            part,
            violations: vec![FieldViolation {
                field: field.into(),
                kind,
            }],
        }
    }

    /// Returns the names of all offending fields.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error returned when the server throttles a request (HTTP 429).
///
/// # Example
///
/// ```rust
/// use bandwidth_api::clients::RateLimitError;
///
/// let error = RateLimitError { limit_reset: Some(1_700_000_000_000) };
/// assert_eq!(error.reset_at().unwrap().timestamp(), 1_700_000_000);
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Rate limit exceeded (reset: {})", .limit_reset.map_or_else(|| "unknown".to_string(), |r| r.to_string()))]
pub struct RateLimitError {
    /// The numeric value of the rate-limit reset header, if it was present.
    pub limit_reset: Option<u64>,
}

impl RateLimitError {
    /// Interprets `limit_reset` as epoch milliseconds.
    #[must_use]
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.limit_reset?).ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }
}

/// Error returned for any other non-successful response.
///
/// # Example
///
/// ```rust
/// use bandwidth_api::clients::ApiError;
///
/// let error = ApiError {
///     status: 404,
///     message: "Call not found".to_string(),
///     request_id: None,
/// };
/// assert_eq!(error.to_string(), "API error 404: Call not found");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("API error {status}: {message}")]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The message the response body provided, if any.
    pub message: String,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub request_id: Option<String>,
}

/// Unified error type for one action invocation or page fetch.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Caller input failed validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server signalled throttling.
    #[error(transparent)]
    RateLimited(#[from] RateLimitError),

    /// The server answered with a non-successful status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The transport could not complete the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ActionError {
    /// Returns the HTTP status associated with this error, if a response existed.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited(_) => Some(429),
            Self::Api(e) => Some(e.status),
            Self::Validation(_) | Self::Network(_) => None,
        }
    }

    /// Returns `true` if repeating the same call later may succeed.
    ///
    /// Purely advisory: the SDK itself never retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited(_) | Self::Network(_) => true,
            Self::Api(e) => e.status >= 500,
            Self::Validation(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_violation() {
        let error = ValidationError {
            part: InputPart::Query,
            violations: vec![
                FieldViolation {
                    field: "size".to_string(),
                    kind: ViolationKind::WrongType {
                        expected: "integer",
                    },
                },
                FieldViolation {
                    field: "color".to_string(),
                    kind: ViolationKind::Unknown,
                },
            ],
        };

        assert_eq!(
            error.to_string(),
            "Invalid query: 'size' must be of type integer; 'color' is not allowed"
        );
        assert_eq!(error.fields(), vec!["size", "color"]);
    }

    #[test]
    fn test_not_an_object_message() {
        let error = ValidationError::single(InputPart::Body, "", ViolationKind::NotAnObject);
        assert_eq!(error.to_string(), "Invalid body: input must be an object");
    }

    #[test]
    fn test_rate_limit_error_message() {
        let error = RateLimitError {
            limit_reset: Some(1000),
        };
        assert_eq!(error.to_string(), "Rate limit exceeded (reset: 1000)");

        let error = RateLimitError { limit_reset: None };
        assert_eq!(error.to_string(), "Rate limit exceeded (reset: unknown)");
        assert!(error.reset_at().is_none());
    }

    #[test]
    fn test_rate_limit_reset_at_uses_milliseconds() {
        let error = RateLimitError {
            limit_reset: Some(1000),
        };
        let reset = error.reset_at().unwrap();
        assert_eq!(reset.timestamp(), 1);
        assert_eq!(reset.timestamp_subsec_millis(), 0);
    }

    #[test]
    fn test_action_error_status() {
        let error: ActionError = ApiError {
            status: 400,
            message: String::new(),
            request_id: None,
        }
        .into();
        assert_eq!(error.status(), Some(400));
        assert!(!error.is_retryable());

        let error: ActionError = RateLimitError { limit_reset: None }.into();
        assert_eq!(error.status(), Some(429));
        assert!(error.is_retryable());

        let error: ActionError =
            ValidationError::single(InputPart::Path, "id", ViolationKind::Missing).into();
        assert_eq!(error.status(), None);
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_server_errors_are_retryable() {
        let error = ActionError::Api(ApiError {
            status: 503,
            message: "unavailable".to_string(),
            request_id: Some("req-1".to_string()),
        });
        assert!(error.is_retryable());
        assert_eq!(error.to_string(), "API error 503: unavailable");
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &RateLimitError { limit_reset: None };
        let _: &dyn std::error::Error = &ApiError {
            status: 400,
            message: "test".to_string(),
            request_id: None,
        };
        let _: &dyn std::error::Error =
            &ValidationError::single(InputPart::Body, "x", ViolationKind::Unknown);
    }
}
