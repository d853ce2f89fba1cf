//! Turns an action descriptor and caller input into an [`HttpRequest`].
//!
//! Building a request is pure: it validates, partitions and encodes, but
//! never touches the network.
//!
//! # Input Partitioning
//!
//! For each input key, in insertion order:
//!
//! 1. Keys naming a path placeholder fill the path
//! 2. Keys listed in the action's `body_keys` go to the JSON body
//! 3. Every other key becomes a query parameter
//!
//! The body is sent only when `body_keys` is non-empty, whatever the method.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};

use crate::clients::{HttpMethod, HttpRequest, InputPart, ValidationError, ViolationKind};
use crate::config::ApiConfig;
use crate::schema::{build_path, param_value, ActionSpec};

/// Builds HTTP requests for actions and page fetches.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestBuilder;

impl RequestBuilder {
    /// Builds the request for one action invocation.
    ///
    /// `input` must be a JSON object, or `null` for no input.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the input is not an object, a path
    /// placeholder has no value, or the body or query part violates its
    /// schema. The body is checked before the query.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bandwidth_api::{ApiConfig, ApiToken, ApiSecret, BaseUrl};
    /// use bandwidth_api::clients::HttpMethod;
    /// use bandwidth_api::rest::RequestBuilder;
    /// use bandwidth_api::schema::ActionSpec;
    /// use serde_json::json;
    ///
    /// let config = ApiConfig::builder()
    ///     .base_url(BaseUrl::new("http://fakeserver").unwrap())
    ///     .api_token(ApiToken::new("token").unwrap())
    ///     .api_secret(ApiSecret::new("secret").unwrap())
    ///     .build()
    ///     .unwrap();
    /// let spec = ActionSpec::new(HttpMethod::Get, "/test2");
    ///
    /// let request = RequestBuilder::build(&spec, json!({"param1": "param1", "param2": 100}), &config)
    ///     .unwrap();
    /// assert_eq!(request.url, "http://fakeserver/test2?param1=param1&param2=100");
    /// assert!(request.body.is_none());
    /// ```
    pub fn build(
        spec: &ActionSpec,
        input: Value,
        config: &ApiConfig,
    ) -> Result<HttpRequest, ValidationError> {
        let mut input = match input {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            _ => {
                return Err(ValidationError::single(
                    InputPart::Query,
                    "",
                    ViolationKind::NotAnObject,
                ))
            }
        };

        let path = build_path(spec.path(), &mut input)?;

        let (body_part, query_part): (Map<String, Value>, Map<String, Value>) =
            input.into_iter().partition(|(key, _)| spec.is_body_key(key));

        spec.body_schema().validate(InputPart::Body, &body_part)?;
        spec.query_schema().validate(InputPart::Query, &query_part)?;

        let mut url = format!("{}{path}", config.base_url());
        let query = encode_query(&query_part);
        if !query.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
        }

        let request = HttpRequest::new(spec.method(), url)
            .header("Authorization", basic_auth(config));

        if spec.body_key_set().is_empty() {
            Ok(request)
        } else {
            Ok(request.json_body(Value::Object(body_part)))
        }
    }

    /// Builds the GET request for a page URL taken from a `Link` header.
    ///
    /// Credentials are attached only when `url` lies under the configured
    /// base URL; links pointing anywhere else are fetched anonymously.
    #[must_use]
    pub fn page_request(url: &str, config: &ApiConfig) -> HttpRequest {
        let request = HttpRequest::new(HttpMethod::Get, url);
        if is_under_base_url(url, config) {
            request.header("Authorization", basic_auth(config))
        } else {
            tracing::warn!(url, "Page link leaves the API base URL; sending without credentials");
            request
        }
    }
}

/// Returns the HTTP Basic `Authorization` header value for the configured credentials.
#[must_use]
pub fn basic_auth(config: &ApiConfig) -> String {
    let credentials = format!(
        "{}:{}",
        config.api_token().as_ref(),
        config.api_secret().as_ref()
    );
    format!("Basic {}", STANDARD.encode(credentials))
}

fn is_under_base_url(url: &str, config: &ApiConfig) -> bool {
    url.strip_prefix(config.base_url().as_ref())
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
}

/// Encodes query parameters in insertion order.
///
/// Arrays repeat their key once per element; `null` values are omitted.
fn encode_query(params: &Map<String, Value>) -> String {
    let mut pairs = Vec::new();

    for (key, value) in params {
        let key = urlencoding::encode(key);
        let values: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };
        for value in values.into_iter().filter(|v| !v.is_null()) {
            pairs.push(format!("{key}={}", urlencoding::encode(&param_value(value))));
        }
    }

    pairs.join("&")
}
