//! HTTP request types for the Bandwidth API SDK.
//!
//! This module provides the [`HttpRequest`] descriptor produced by the
//! request builder and consumed by the transport.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP methods an action may use.
///
/// Serialized in upper case (`"GET"`), which is how schema catalogs spell them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    #[serde(alias = "get")]
    Get,
    /// HTTP POST method for creating resources.
    #[serde(alias = "post")]
    Post,
    /// HTTP PUT method for replacing resources.
    #[serde(alias = "put")]
    Put,
    /// HTTP PATCH method for partially updating resources.
    #[serde(alias = "patch")]
    Patch,
    /// HTTP DELETE method for removing resources.
    #[serde(alias = "delete")]
    Delete,
}

impl HttpMethod {
    /// Returns the method as used on the wire (e.g., "GET").
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A fully resolved HTTP request, ready to hand to the transport.
///
/// Building one performs no I/O; the URL already carries the encoded query
/// string and the headers already carry credentials.
///
/// # Example
///
/// ```rust
/// use bandwidth_api::clients::{HttpMethod, HttpRequest};
///
/// let request = HttpRequest::new(HttpMethod::Get, "http://fakeserver/test2?param1=param1");
/// assert_eq!(request.url, "http://fakeserver/test2?param1=param1");
/// assert!(request.body.is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The absolute URL, including any query string.
    pub url: String,
    /// Request headers, in the order they were added.
    pub headers: Vec<(String, String)>,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Sets a JSON body and the matching `Content-Type` header.
    #[must_use]
    pub fn json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self.header("Content-Type", "application/json")
    }

    /// Returns the first header value with the given name (case-insensitive).
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the query string portion of the URL, without the `?`.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.url.split_once('?').map(|(_, query)| query)
    }
}
