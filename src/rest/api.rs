//! The API namespace built from a schema catalog.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::clients::HttpClient;
use crate::config::ApiConfig;
use crate::error::ConfigError;
use crate::rest::resource::Resource;
use crate::rest::response::ResponseClassifier;
use crate::schema::SchemaCatalog;

/// State shared by every action of one namespace.
#[derive(Debug)]
pub(crate) struct ApiContext {
    pub(crate) config: ApiConfig,
    pub(crate) client: HttpClient,
    pub(crate) classifier: ResponseClassifier,
}

/// A namespace of [`Resource`]s, one per catalog entry.
///
/// The namespace is immutable once built. Looking up the same resource
/// twice returns the same object.
///
/// # Example
///
/// ```rust
/// use bandwidth_api::{ApiConfig, ApiSecret, ApiToken, BandwidthApi};
/// use bandwidth_api::clients::HttpMethod;
/// use bandwidth_api::schema::{ActionSpec, ResourceSpec, SchemaCatalog};
///
/// let config = ApiConfig::builder()
///     .api_token(ApiToken::new("token").unwrap())
///     .api_secret(ApiSecret::new("secret").unwrap())
///     .build()
///     .unwrap();
/// let catalog = SchemaCatalog::new().resource(
///     "Call",
///     ResourceSpec::new().action("list", ActionSpec::new(HttpMethod::Get, "/calls").paginated(true)),
/// );
///
/// let api = BandwidthApi::new(config, &catalog).unwrap();
/// assert!(api.resource("Call").unwrap().action("list").is_some());
/// assert!(api.resource("Unknown").is_none());
/// ```
#[derive(Debug)]
pub struct BandwidthApi {
    resources: BTreeMap<String, Resource>,
    context: Arc<ApiContext>,
}

// Verify BandwidthApi is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BandwidthApi>();
};

impl BandwidthApi {
    /// Builds the namespace for `catalog` using `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidActionSpec`] if a catalog entry is
    /// inconsistent, or [`ConfigError::HttpClient`] if the transport cannot
    /// be created.
    pub fn new(config: ApiConfig, catalog: &SchemaCatalog) -> Result<Self, ConfigError> {
        catalog.validate()?;

        let client = HttpClient::new(&config)?;
        let classifier = ResponseClassifier::from_config(&config);
        let context = Arc::new(ApiContext {
            config,
            client,
            classifier,
        });

        let resources: BTreeMap<String, Resource> = catalog
            .iter()
            .map(|(name, spec)| (name.to_string(), Resource::new(name, spec, &context)))
            .collect();

        tracing::debug!(
            base_url = %context.config.base_url(),
            resources = resources.len(),
            "Built API namespace"
        );

        Ok(Self { resources, context })
    }

    /// Looks up a resource by name.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    /// Returns the names of every resource, sorted.
    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Returns the configuration this namespace was built with.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.context.config
    }
}
