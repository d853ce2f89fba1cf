//! Lazy traversal of `Link`-header paginated collections.
//!
//! A [`PageStream`] starts with the items of the response that created it
//! and fetches each following page only when asked. The first call to
//! [`PageStream::next_page`] yields those initial items without any I/O.
//!
//! # Termination
//!
//! The stream ends when:
//!
//! - the current page has no `next` link
//! - the page just fetched is the known `last` page
//! - the `next` link points at a page that was already fetched
//!
//! # Example
//!
//! ```rust,ignore
//! use bandwidth_api::ActionOutput;
//!
//! let mut pages = api.resource("Call").unwrap().action("list").unwrap()
//!     .list(json!({"size": 25}))
//!     .await?;
//!
//! while let Some(page) = pages.next_page().await {
//!     for call in page? {
//!         println!("{}", call["id"]);
//!     }
//! }
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, Stream};
use serde_json::Value;

use crate::clients::{ActionError, LinkSet};
use crate::rest::api::ApiContext;
use crate::rest::request::RequestBuilder;

/// Position of a [`PageStream`] within a paginated collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageCursor {
    current_url: String,
    next_url: Option<String>,
    last_url: Option<String>,
    fetched: HashSet<String>,
}

impl PageCursor {
    /// Creates a cursor positioned on the page fetched from `url`.
    #[must_use]
    pub fn new(url: impl Into<String>, links: &LinkSet) -> Self {
        let mut cursor = Self::default();
        cursor.advance(url.into(), links);
        cursor
    }

    /// Moves the cursor onto the page fetched from `url`, which answered with `links`.
    pub fn advance(&mut self, url: String, links: &LinkSet) {
        let reached_last =
            self.last_url.as_deref() == Some(url.as_str()) || links.last() == Some(url.as_str());

        self.fetched.insert(url.clone());
        self.current_url = url;
        if let Some(last) = links.last() {
            self.last_url = Some(last.to_string());
        }

        self.next_url = match links.next() {
            _ if reached_last => None,
            Some(next) if self.fetched.contains(next) => {
                tracing::debug!(url = next, "Pagination cycle detected");
                None
            }
            next => next.map(ToString::to_string),
        };
    }

    /// Returns the URL of the page most recently fetched.
    #[must_use]
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Returns the URL of the page that would be fetched next.
    #[must_use]
    pub fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    /// Returns the last-page URL, if any response announced one.
    #[must_use]
    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    /// Returns `true` if there is nothing left to fetch.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.next_url.is_none()
    }
}

/// A lazily fetched sequence of pages.
///
/// A `PageStream` has a single consumer: it is advanced through `&mut self`,
/// so concurrent advancement cannot happen. A failed fetch leaves the cursor
/// where it was, and calling [`next_page`](Self::next_page) again retries
/// the same page.
#[derive(Debug)]
pub struct PageStream {
    initial: Option<Vec<Value>>,
    cursor: PageCursor,
    context: Arc<ApiContext>,
}

// Verify PageStream is Send at compile time
const _: fn() = || {
    const fn assert_send<T: Send>() {}
    assert_send::<PageStream>();
};

impl PageStream {
    pub(crate) fn new(
        initial: Value,
        url: impl Into<String>,
        links: &LinkSet,
        context: Arc<ApiContext>,
    ) -> Self {
        Self {
            initial: Some(page_items(initial)),
            cursor: PageCursor::new(url, links),
            context,
        }
    }

    /// Returns the stream's position.
    #[must_use]
    pub const fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Returns `true` if every page has been yielded.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.initial.is_none() && self.cursor.is_exhausted()
    }

    /// Yields the next page of items, or `None` when the collection is exhausted.
    ///
    /// Array bodies yield their elements, `null` yields an empty page, and
    /// any other body yields a single item.
    pub async fn next_page(&mut self) -> Option<Result<Vec<Value>, ActionError>> {
        if let Some(items) = self.initial.take() {
            return Some(Ok(items));
        }

        let url = self.cursor.next_url.clone()?;
        tracing::debug!(url = %url, "Fetching next page");

        let request = RequestBuilder::page_request(&url, &self.context.config);
        let response = match self.context.client.send(&request).await {
            Ok(response) => response,
            Err(e) => return Some(Err(e.into())),
        };

        let outcome = self.context.classifier.classify_response(&response);
        let success = match outcome.into_result(response.request_id()) {
            Ok(success) => success,
            Err(e) => return Some(Err(e)),
        };

        self.cursor.advance(url, &response.links());
        Some(Ok(page_items(success.into_value())))
    }

    /// Fetches every remaining page and concatenates their items.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; items gathered so far are dropped.
    pub async fn collect_all(mut self) -> Result<Vec<Value>, ActionError> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await {
            items.extend(page?);
        }
        Ok(items)
    }

    /// Converts this page stream into a [`Stream`] of pages.
    ///
    /// The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<Value>, ActionError>> {
        stream::unfold(Some(self), |state| async move {
            let mut pages = state?;
            match pages.next_page().await? {
                Ok(items) => Some((Ok(items), Some(pages))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}

fn page_items(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}
