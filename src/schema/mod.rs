//! Declarative description of the API surface.
//!
//! A [`SchemaCatalog`] maps resource names to [`ResourceSpec`]s, which map
//! action names to [`ActionSpec`]s. The catalog is plain data: it is built
//! once (in code or from JSON) and handed to
//! [`BandwidthApi::new`](crate::BandwidthApi::new), which checks it and binds
//! every action.
//!
//! # Example
//!
//! ```rust
//! use bandwidth_api::clients::HttpMethod;
//! use bandwidth_api::schema::{ActionSpec, FieldType, ResourceSpec, Schema, SchemaCatalog};
//!
//! let catalog = SchemaCatalog::new().resource(
//!     "Call",
//!     ResourceSpec::new()
//!         .action(
//!             "create",
//!             ActionSpec::new(HttpMethod::Post, "/users/{userId}/calls")
//!                 .body(
//!                     Schema::object()
//!                         .required("from", FieldType::String)
//!                         .required("to", FieldType::String),
//!                 )
//!                 .body_keys(["from", "to"]),
//!         )
//!         .action(
//!             "list",
//!             ActionSpec::new(HttpMethod::Get, "/users/{userId}/calls").paginated(true),
//!         ),
//! );
//!
//! assert!(catalog.validate().is_ok());
//! ```

mod path;
mod validator;

pub use path::{build_path, param_value, placeholders};
pub use validator::{FieldRule, FieldType, ObjectSchema, Schema};

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::error::ConfigError;

/// Declarative descriptor of one API operation.
///
/// Input keys listed in `body_keys` are sent in the JSON body and validated
/// against `body`; keys naming a path placeholder fill the path; every other
/// key becomes a query parameter validated against `query`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSpec {
    method: HttpMethod,
    path: String,
    #[serde(default)]
    query: Schema,
    #[serde(default)]
    body: Schema,
    #[serde(default)]
    body_keys: BTreeSet<String>,
    #[serde(default)]
    paginated: bool,
}

impl ActionSpec {
    /// Creates a descriptor with open query and body schemas and no body keys.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Schema::Any,
            body: Schema::Any,
            body_keys: BTreeSet::new(),
            paginated: false,
        }
    }

    /// Sets the query parameter schema.
    #[must_use]
    pub fn query(mut self, schema: impl Into<Schema>) -> Self {
        self.query = schema.into();
        self
    }

    /// Sets the body schema.
    #[must_use]
    pub fn body(mut self, schema: impl Into<Schema>) -> Self {
        self.body = schema.into();
        self
    }

    /// Sets the input keys that are sent in the request body.
    #[must_use]
    pub fn body_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the action as returning a paginated list.
    #[must_use]
    pub const fn paginated(mut self, paginated: bool) -> Self {
        self.paginated = paginated;
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the path template.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query parameter schema.
    #[must_use]
    pub const fn query_schema(&self) -> &Schema {
        &self.query
    }

    /// Returns the body schema.
    #[must_use]
    pub const fn body_schema(&self) -> &Schema {
        &self.body
    }

    /// Returns the keys routed to the request body.
    #[must_use]
    pub const fn body_key_set(&self) -> &BTreeSet<String> {
        &self.body_keys
    }

    /// Returns `true` if the action may answer with a paginated list.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.paginated
    }

    /// Returns `true` if `key` is routed to the request body.
    #[must_use]
    pub fn is_body_key(&self, key: &str) -> bool {
        self.body_keys.contains(key)
    }

    /// Checks the descriptor's internal consistency.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when:
    /// - the path does not start with `/`
    /// - a field declared by the body schema is missing from `body_keys`
    /// - a body key would be rejected as unknown by a closed body schema
    /// - a field declared by the query schema is also a body key
    /// - a path placeholder is also a body key
    pub fn check(&self) -> Result<(), String> {
        if !self.path.starts_with('/') {
            return Err(format!("path '{}' must start with '/'", self.path));
        }

        if let Some(field) = self.body.field_names().find(|f| !self.is_body_key(f)) {
            return Err(format!("body field '{field}' is missing from body_keys"));
        }

        if let Some(key) = self.body_keys.iter().find(|k| !self.body.accepts_field(k)) {
            return Err(format!("body key '{key}' is not accepted by the body schema"));
        }

        if let Some(field) = self.query.field_names().find(|f| self.is_body_key(f)) {
            return Err(format!("query field '{field}' is also listed in body_keys"));
        }

        if let Some(name) = placeholders(&self.path)
            .into_iter()
            .find(|name| self.is_body_key(name))
        {
            return Err(format!("path placeholder '{name}' is also listed in body_keys"));
        }

        Ok(())
    }
}

/// The actions declared for one resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceSpec {
    actions: BTreeMap<String, ActionSpec>,
}

impl ResourceSpec {
    /// Creates a resource with no actions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an action, replacing any previous one of the same name.
    #[must_use]
    pub fn action(mut self, name: impl Into<String>, spec: ActionSpec) -> Self {
        self.actions.insert(name.into(), spec);
        self
    }

    /// Returns the descriptor for an action, if declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ActionSpec> {
        self.actions.get(name)
    }

    /// Iterates over `(action name, descriptor)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActionSpec)> {
        self.actions.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Returns the number of declared actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if no action is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// The complete API description: resource name to [`ResourceSpec`].
///
/// # JSON Format
///
/// ```json
/// {
///   "Test": {
///     "action": {
///       "method": "POST",
///       "path": "/test",
///       "body": {"type": "object", "fields": {"test": {"type": "string"}}},
///       "bodyKeys": ["test"]
///     },
///     "lazyList": {"method": "GET", "path": "/lazy-list", "paginated": true}
///   }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaCatalog {
    resources: BTreeMap<String, ResourceSpec>,
}

impl SchemaCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a catalog from its JSON description.
    ///
    /// The result is not checked; see [`SchemaCatalog::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCatalog`] if the JSON does not describe
    /// a catalog.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidCatalog {
            reason: e.to_string(),
        })
    }

    /// Declares a resource, replacing any previous one of the same name.
    #[must_use]
    pub fn resource(mut self, name: impl Into<String>, spec: ResourceSpec) -> Self {
        self.resources.insert(name.into(), spec);
        self
    }

    /// Returns the descriptor for a resource, if declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResourceSpec> {
        self.resources.get(name)
    }

    /// Iterates over `(resource name, descriptor)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceSpec)> {
        self.resources
            .iter()
            .map(|(name, spec)| (name.as_str(), spec))
    }

    /// Returns the number of declared resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if no resource is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Checks every action descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidActionSpec`] for the first inconsistent
    /// descriptor, in resource then action name order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (resource, spec) in self.iter() {
            for (action, action_spec) in spec.iter() {
                action_spec
                    .check()
                    .map_err(|reason| ConfigError::InvalidActionSpec {
                        resource: resource.to_string(),
                        action: action.to_string(),
                        reason,
                    })?;
            }
        }
        Ok(())
    }
}

// Verify catalog types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ActionSpec>();
    assert_send_sync::<SchemaCatalog>();
};
