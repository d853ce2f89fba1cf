//! Invocation of a single API action.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::{ActionError, HttpRequest, HttpResponse};
use crate::rest::api::ApiContext;
use crate::rest::pagination::PageStream;
use crate::rest::request::RequestBuilder;
use crate::rest::response::Success;
use crate::schema::ActionSpec;

/// The successful result of [`Action::call`].
pub enum ActionOutput {
    /// The server created a resource (201 with `Location`).
    Created {
        /// The new resource's identifier.
        id: String,
    },
    /// The parsed response body (`Value::Null` when empty).
    Value(Value),
    /// The first page of a paginated collection.
    Pages(PageStream),
}

impl ActionOutput {
    /// Returns the created identifier, if this is [`ActionOutput::Created`].
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Created { id } => Some(id),
            _ => None,
        }
    }

    /// Returns the response body, if this is [`ActionOutput::Value`].
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the page stream, if this is [`ActionOutput::Pages`].
    #[must_use]
    pub fn into_pages(self) -> Option<PageStream> {
        match self {
            Self::Pages(pages) => Some(pages),
            _ => None,
        }
    }
}

impl fmt::Debug for ActionOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { id } => f.debug_struct("Created").field("id", id).finish(),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Pages(pages) => f
                .debug_struct("Pages")
                .field("cursor", pages.cursor())
                .finish_non_exhaustive(),
        }
    }
}

/// A callable operation of a [`Resource`](crate::rest::Resource).
///
/// Each invocation validates its input, sends one request and classifies
/// the response. Calls are independent; an `Action` can be invoked
/// concurrently from many tasks.
///
/// # Example
///
/// ```rust,ignore
/// use bandwidth_api::ActionOutput;
/// use serde_json::json;
///
/// let create = api.resource("Call").unwrap().action("create").unwrap();
/// match create.call(json!({"from": "+15550000000", "to": "+15551234567"})).await? {
///     ActionOutput::Created { id } => println!("Created call {id}"),
///     other => println!("Unexpected: {other:?}"),
/// }
/// ```
#[derive(Clone)]
pub struct Action {
    resource: String,
    name: String,
    spec: ActionSpec,
    context: Arc<ApiContext>,
}

// Verify Action is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Action>();
};

impl Action {
    pub(crate) fn new(
        resource: impl Into<String>,
        name: impl Into<String>,
        spec: ActionSpec,
        context: Arc<ApiContext>,
    ) -> Self {
        Self {
            resource: resource.into(),
            name: name.into(),
            spec,
            context,
        }
    }

    /// Returns the action name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name of the resource this action belongs to.
    #[must_use]
    pub fn resource_name(&self) -> &str {
        &self.resource
    }

    /// Returns the descriptor this action was built from.
    #[must_use]
    pub const fn spec(&self) -> &ActionSpec {
        &self.spec
    }

    /// Invokes the action.
    ///
    /// `input` must be a JSON object, or `null` for no input. Paginated
    /// actions whose response carries a `Link` header resolve to
    /// [`ActionOutput::Pages`].
    ///
    /// # Errors
    ///
    /// - [`ActionError::Validation`] if the input is rejected (no request is sent)
    /// - [`ActionError::RateLimited`] if the server answers 429
    /// - [`ActionError::Api`] for any other non-2xx status
    /// - [`ActionError::Network`] if no response was received
    pub async fn call(&self, input: Value) -> Result<ActionOutput, ActionError> {
        let (request, response, success) = self.dispatch(input).await?;

        match success {
            Success::Created { id } => Ok(ActionOutput::Created { id }),
            Success::Value(value) if self.spec.is_paginated() && response.has_links() => {
                Ok(ActionOutput::Pages(PageStream::new(
                    value,
                    request.url,
                    &response.links(),
                    Arc::clone(&self.context),
                )))
            }
            Success::Value(value) => Ok(ActionOutput::Value(value)),
        }
    }

    /// Invokes the action and always returns a page stream.
    ///
    /// Responses without pagination links become a single page; a created
    /// resource becomes one `{"id": ...}` item.
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn list(&self, input: Value) -> Result<PageStream, ActionError> {
        let (request, response, success) = self.dispatch(input).await?;

        Ok(PageStream::new(
            success.into_value(),
            request.url,
            &response.links(),
            Arc::clone(&self.context),
        ))
    }

    /// Builds, sends and classifies one request.
    async fn dispatch(
        &self,
        input: Value,
    ) -> Result<(HttpRequest, HttpResponse, Success), ActionError> {
        let request = RequestBuilder::build(&self.spec, input, &self.context.config)?;

        tracing::debug!(
            resource = %self.resource,
            action = %self.name,
            method = %request.method,
            url = %request.url,
            "Invoking action"
        );

        let response = self.context.client.send(&request).await?;
        let outcome = self.context.classifier.classify_response(&response);
        let success = outcome.into_result(response.request_id())?;

        Ok((request, response, success))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("resource", &self.resource)
            .field("name", &self.name)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}
