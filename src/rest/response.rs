//! Classification of raw HTTP responses into action outcomes.
//!
//! Every response maps to exactly one [`Outcome`], checked in this order:
//!
//! | Status                          | Outcome                        |
//! |---------------------------------|--------------------------------|
//! | 201 with a `Location` header    | [`Outcome::Created`]           |
//! | 2xx                             | [`Outcome::Success`]           |
//! | 429                             | [`Outcome::RateLimited`]       |
//! | anything else                   | [`Outcome::Failure`]           |

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::clients::{ActionError, ApiError, HttpResponse, RateLimitError};
use crate::config::ApiConfig;

/// The classified result of one HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A resource was created; `id` is the last path segment of `Location`.
    Created {
        /// The new resource's identifier.
        id: String,
    },
    /// A 2xx response. The body is `null` when empty and a JSON string when
    /// it could not be parsed as JSON.
    Success(Value),
    /// The server throttled the request.
    RateLimited {
        /// The rate-limit reset header as a number, if present and numeric.
        limit_reset: Option<u64>,
    },
    /// Any other non-2xx response.
    Failure {
        /// The HTTP status code.
        status: u16,
        /// A human-readable message taken from the body.
        message: String,
    },
}

/// A successful [`Outcome`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Success {
    /// See [`Outcome::Created`].
    Created {
        /// The new resource's identifier.
        id: String,
    },
    /// See [`Outcome::Success`].
    Value(Value),
}

impl Success {
    /// Returns the payload as JSON; `Created` becomes `{"id": ...}`.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Created { id } => json!({ "id": id }),
            Self::Value(value) => value,
        }
    }
}

impl Outcome {
    /// Converts the outcome into a result, mapping failures to [`ActionError`].
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::RateLimited`] or [`ActionError::Api`] for the
    /// corresponding outcomes.
    pub fn into_result(self, request_id: Option<&str>) -> Result<Success, ActionError> {
        match self {
            Self::Created { id } => Ok(Success::Created { id }),
            Self::Success(value) => Ok(Success::Value(value)),
            Self::RateLimited { limit_reset } => Err(RateLimitError { limit_reset }.into()),
            Self::Failure { status, message } => Err(ApiError {
                status,
                message,
                request_id: request_id.map(ToString::to_string),
            }
            .into()),
        }
    }
}

/// Maps responses to [`Outcome`]s.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use bandwidth_api::rest::{Outcome, ResponseClassifier};
///
/// let classifier = ResponseClassifier::new("X-RateLimit-Reset");
///
/// let mut headers = HashMap::new();
/// headers.insert("Location".to_string(), vec!["http://localhost/id".to_string()]);
/// assert_eq!(
///     classifier.classify(201, &headers, None),
///     Outcome::Created { id: "id".to_string() }
/// );
/// ```
#[derive(Clone, Debug)]
pub struct ResponseClassifier {
    rate_limit_reset_header: String,
}

impl ResponseClassifier {
    /// Creates a classifier reading the reset time from `rate_limit_reset_header`.
    #[must_use]
    pub fn new(rate_limit_reset_header: impl Into<String>) -> Self {
        Self {
            rate_limit_reset_header: rate_limit_reset_header.into(),
        }
    }

    /// Creates a classifier using the configured rate-limit reset header.
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.rate_limit_reset_header())
    }

    /// Classifies a status, header map (any case) and optional body.
    #[must_use]
    pub fn classify(
        &self,
        status: u16,
        headers: &HashMap<String, Vec<String>>,
        body: Option<&[u8]>,
    ) -> Outcome {
        let body = body.filter(|b| !b.is_empty());

        if status == 201 {
            if let Some(id) = find_header(headers, "location").and_then(location_id) {
                return Outcome::Created { id };
            }
        }

        if (200..300).contains(&status) {
            return Outcome::Success(parse_body(body));
        }

        if status == 429 {
            let limit_reset =
                find_header(headers, &self.rate_limit_reset_header).and_then(parse_reset);
            tracing::warn!(?limit_reset, "Rate limit exceeded");
            return Outcome::RateLimited { limit_reset };
        }

        Outcome::Failure {
            status,
            message: failure_message(status, body),
        }
    }

    /// Classifies a transport response.
    #[must_use]
    pub fn classify_response(&self, response: &HttpResponse) -> Outcome {
        self.classify(response.code, &response.headers, response.body.as_deref())
    }
}

fn find_header<'a>(headers: &'a HashMap<String, Vec<String>>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(String::as_str)
}

/// Extracts the last non-empty path segment of a `Location` value.
fn location_id(location: &str) -> Option<String> {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    let id = path.rsplit('/').next()?;
    if id.is_empty() {
        None
    } else {
        Some(urlencoding::decode(id).map_or_else(|_| id.to_string(), |d| d.into_owned()))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_reset(value: &str) -> Option<u64> {
    let value = value.trim();
    value.parse::<u64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u64)
    })
}

fn parse_body(body: Option<&[u8]>) -> Value {
    match body {
        None => Value::Null,
        Some(bytes) => serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned())),
    }
}

/// Picks the most descriptive message a failure body offers.
fn failure_message(status: u16, body: Option<&[u8]>) -> String {
    if let Some(bytes) = body {
        if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(bytes) {
            for key in ["message", "description", "error"] {
                if let Some(Value::String(message)) = map.get(key) {
                    if !message.is_empty() {
                        return message.clone();
                    }
                }
            }
        }

        let text = String::from_utf8_lossy(bytes).trim().to_string();
        if !text.is_empty() {
            return text;
        }
    }

    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (k, v) in pairs {
            map.entry((*k).to_string()).or_default().push((*v).to_string());
        }
        map
    }

    fn classifier() -> ResponseClassifier {
        ResponseClassifier::new("X-RateLimit-Reset")
    }

    #[test]
    fn test_created_with_location_yields_id() {
        let outcome = classifier().classify(
            201,
            &headers(&[("Location", "http://localhost/id")]),
            Some(b"{\"ignored\":true}"),
        );
        assert_eq!(outcome, Outcome::Created { id: "id".to_string() });
    }

    #[test]
    fn test_location_id_ignores_query_and_trailing_slash() {
        let outcome = classifier().classify(
            201,
            &headers(&[("location", "https://api.example.com/v1/calls/c-123/?x=1")]),
            None,
        );
        assert_eq!(
            outcome,
            Outcome::Created {
                id: "c-123".to_string()
            }
        );
    }

    #[test]
    fn test_created_without_location_is_success() {
        let outcome = classifier().classify(201, &HashMap::new(), Some(b"{\"test3\":true}"));
        assert_eq!(outcome, Outcome::Success(json!({"test3": true})));
    }

    #[test]
    fn test_success_parses_json_body() {
        let outcome = classifier().classify(200, &HashMap::new(), Some(b"{\"result\":true}"));
        assert_eq!(outcome, Outcome::Success(json!({"result": true})));
    }

    #[test]
    fn test_success_with_empty_body_is_null() {
        assert_eq!(
            classifier().classify(204, &HashMap::new(), None),
            Outcome::Success(Value::Null)
        );
        assert_eq!(
            classifier().classify(200, &HashMap::new(), Some(b"")),
            Outcome::Success(Value::Null)
        );
    }

    #[test]
    fn test_success_with_text_body_is_string() {
        let outcome = classifier().classify(200, &HashMap::new(), Some(b"plain text"));
        assert_eq!(outcome, Outcome::Success(json!("plain text")));
    }

    #[test]
    fn test_rate_limited_reads_reset_header() {
        let outcome =
            classifier().classify(429, &headers(&[("x-ratelimit-reset", "1000")]), None);
        assert_eq!(
            outcome,
            Outcome::RateLimited {
                limit_reset: Some(1000)
            }
        );
    }

    #[test]
    fn test_rate_limited_without_numeric_reset() {
        assert_eq!(
            classifier().classify(429, &HashMap::new(), None),
            Outcome::RateLimited { limit_reset: None }
        );
        assert_eq!(
            classifier().classify(429, &headers(&[("X-RateLimit-Reset", "soon")]), None),
            Outcome::RateLimited { limit_reset: None }
        );
    }

    #[test]
    fn test_custom_reset_header() {
        let classifier = ResponseClassifier::new("Retry-After-Ms");
        let outcome = classifier.classify(
            429,
            &headers(&[("X-RateLimit-Reset", "1"), ("retry-after-ms", "2500")]),
            None,
        );
        assert_eq!(
            outcome,
            Outcome::RateLimited {
                limit_reset: Some(2500)
            }
        );
    }

    #[test]
    fn test_failure_message_from_json_fields() {
        let outcome = classifier().classify(
            400,
            &HashMap::new(),
            Some(b"{\"code\":\"bad\",\"message\":\"Missing to\"}"),
        );
        assert_eq!(
            outcome,
            Outcome::Failure {
                status: 400,
                message: "Missing to".to_string()
            }
        );

        let outcome = classifier().classify(
            404,
            &HashMap::new(),
            Some(b"{\"description\":\"No such call\"}"),
        );
        assert_eq!(
            outcome,
            Outcome::Failure {
                status: 404,
                message: "No such call".to_string()
            }
        );
    }

    #[test]
    fn test_failure_message_falls_back_to_body_then_reason() {
        assert_eq!(
            classifier().classify(500, &HashMap::new(), Some(b"boom")),
            Outcome::Failure {
                status: 500,
                message: "boom".to_string()
            }
        );
        assert_eq!(
            classifier().classify(400, &HashMap::new(), None),
            Outcome::Failure {
                status: 400,
                message: "Bad Request".to_string()
            }
        );
    }

    #[test]
    fn test_redirect_is_failure() {
        let outcome = classifier().classify(302, &headers(&[("Location", "/elsewhere")]), None);
        assert!(matches!(outcome, Outcome::Failure { status: 302, .. }));
    }

    #[test]
    fn test_into_result_maps_errors() {
        let error = Outcome::Failure {
            status: 400,
            message: "bad".to_string(),
        }
        .into_result(Some("req-1"))
        .unwrap_err();
        match error {
            ActionError::Api(e) => {
                assert_eq!(e.status, 400);
                assert_eq!(e.request_id.as_deref(), Some("req-1"));
            }
            other => panic!("Expected Api, got: {other:?}"),
        }

        let error = Outcome::RateLimited {
            limit_reset: Some(1000),
        }
        .into_result(None)
        .unwrap_err();
        assert!(matches!(
            error,
            ActionError::RateLimited(RateLimitError {
                limit_reset: Some(1000)
            })
        ));
    }

    #[test]
    fn test_created_into_value() {
        let success = Outcome::Created { id: "id".to_string() }
            .into_result(None)
            .unwrap();
        assert_eq!(success.into_value(), json!({"id": "id"}));
    }
}
