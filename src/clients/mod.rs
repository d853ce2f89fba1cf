//! HTTP transport types for Bandwidth API communication.
//!
//! This module provides the low-level layer underneath the action namespace:
//! the request descriptor, the raw response, `Link` header parsing, the
//! transport itself, and the error taxonomy every action reports.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async transport
//! - [`HttpRequest`]: A fully resolved request (URL, headers, JSON body)
//! - [`HttpResponse`]: A raw response (status, headers, body bytes)
//! - [`HttpMethod`]: Supported HTTP methods
//! - [`LinkSet`]: Relation URLs parsed from a `Link` header
//! - [`ActionError`]: The error returned by every action invocation
//!
//! # Retry Behavior
//!
//! There is none. Rate-limit and API failures are surfaced to the caller
//! immediately, and [`ActionError::is_retryable`] is advisory only.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{
    ActionError, ApiError, FieldViolation, InputPart, RateLimitError, ValidationError,
    ViolationKind,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest};
pub use http_response::{HttpResponse, LinkSet};
