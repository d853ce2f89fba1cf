//! # Bandwidth API Rust SDK
//!
//! A schema-driven Rust client for the Bandwidth REST API. Resources and
//! their actions are not hand-written: they are generated at runtime from a
//! declarative [`SchemaCatalog`](schema::SchemaCatalog).
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//! - Validated newtypes for API credentials and the base URL
//! - A declarative catalog of resources and actions with input schemas
//! - Input validation before any network I/O
//! - Response classification into created / success / rate-limited / failure
//! - Lazy `Link`-header pagination via [`PageStream`]
//!
//! ## Quick Start
//!
//! ```rust
//! use bandwidth_api::{ApiConfig, ApiSecret, ApiToken, BandwidthApi};
//! use bandwidth_api::clients::HttpMethod;
//! use bandwidth_api::schema::{ActionSpec, FieldType, ResourceSpec, Schema, SchemaCatalog};
//!
//! // Create configuration using the builder pattern
//! let config = ApiConfig::builder()
//!     .api_token(ApiToken::new("your-api-token").unwrap())
//!     .api_secret(ApiSecret::new("your-api-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! // Describe the API surface
//! let catalog = SchemaCatalog::new().resource(
//!     "Message",
//!     ResourceSpec::new().action(
//!         "send",
//!         ActionSpec::new(HttpMethod::Post, "/users/{userId}/messages")
//!             .body(
//!                 Schema::object()
//!                     .required("from", FieldType::String)
//!                     .required("to", FieldType::String)
//!                     .field("text", FieldType::String),
//!             )
//!             .body_keys(["from", "to", "text"]),
//!     ),
//! );
//!
//! let api = BandwidthApi::new(config, &catalog).unwrap();
//! assert_eq!(api.resource_names().collect::<Vec<_>>(), vec!["Message"]);
//! ```
//!
//! ## Invoking Actions
//!
//! ```rust,ignore
//! use bandwidth_api::{ActionError, ActionOutput};
//! use serde_json::json;
//!
//! let send = api.resource("Message").unwrap().action("send").unwrap();
//!
//! match send.call(json!({"userId": "u-1", "from": "+15550000000", "to": "+15551234567"})).await {
//!     Ok(ActionOutput::Created { id }) => println!("Sent {id}"),
//!     Ok(other) => println!("Response: {other:?}"),
//!     Err(ActionError::RateLimited(e)) => println!("Retry after {:?}", e.reset_at()),
//!     Err(e) => println!("Failed: {e}"),
//! }
//! ```
//!
//! ## Pagination
//!
//! ```rust,ignore
//! use futures::StreamExt;
//!
//! let list = api.resource("Call").unwrap().action("list").unwrap();
//! let pages = list.list(json!({"userId": "u-1", "size": 100})).await?;
//!
//! let mut pages = Box::pin(pages.into_stream());
//! while let Some(page) = pages.next().await {
//!     for call in page? {
//!         println!("{}", call["id"]);
//!     }
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes and catalogs validate on construction
//! - **Thread-safe**: The namespace and its actions are `Send + Sync`
//! - **Async-first**: Actions are `async` and runtime-agnostic
//! - **No hidden retries**: Every failure is surfaced to the caller

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod schema;

// Re-export public types at crate root for convenience
pub use config::{ApiConfig, ApiConfigBuilder, ApiSecret, ApiToken, BaseUrl};
pub use error::ConfigError;

// Re-export error types
pub use clients::{ActionError, ApiError, InputPart, RateLimitError, ValidationError};

// Re-export namespace types
pub use rest::{
    Action, ActionOutput, BandwidthApi, Outcome, PageStream, RequestBuilder, Resource,
    ResponseClassifier,
};
pub use schema::{ActionSpec, ResourceSpec, Schema, SchemaCatalog};
