//! The action namespace and its request/response machinery.
//!
//! This module turns a [`SchemaCatalog`](crate::schema::SchemaCatalog) into
//! callable operations:
//!
//! - **[`BandwidthApi`]**: The namespace of resources built from a catalog
//! - **[`Resource`]**: A named group of actions
//! - **[`Action`]**: One callable operation
//! - **[`RequestBuilder`]**: Validates input and produces the HTTP request
//! - **[`ResponseClassifier`]**: Maps a response to an [`Outcome`]
//! - **[`PageStream`]**: Lazy traversal of paginated collections
//!
//! # Example
//!
//! ```rust,ignore
//! use bandwidth_api::{ActionOutput, ApiConfig, ApiSecret, ApiToken, BandwidthApi};
//! use bandwidth_api::schema::SchemaCatalog;
//! use serde_json::json;
//!
//! let config = ApiConfig::builder()
//!     .api_token(ApiToken::new("token")?)
//!     .api_secret(ApiSecret::new("secret")?)
//!     .build()?;
//! let catalog = SchemaCatalog::from_json(include_str!("catalog.json"))?;
//! let api = BandwidthApi::new(config, &catalog)?;
//!
//! let output = api
//!     .resource("Message").unwrap()
//!     .action("send").unwrap()
//!     .call(json!({"from": "+15550000000", "to": "+15551234567", "text": "hi"}))
//!     .await?;
//!
//! if let ActionOutput::Created { id } = output {
//!     println!("Sent message {id}");
//! }
//! ```

mod action;
mod api;
mod pagination;
mod request;
mod resource;
mod response;

pub use action::{Action, ActionOutput};
pub use api::BandwidthApi;
pub use pagination::{PageCursor, PageStream};
pub use request::{basic_auth, RequestBuilder};
pub use resource::Resource;
pub use response::{Outcome, ResponseClassifier, Success};
