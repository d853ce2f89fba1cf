//! HTTP response types for the Bandwidth API SDK.
//!
//! This module provides the raw [`HttpResponse`] returned by the transport
//! and the [`LinkSet`] parsed from its `Link` header.

use std::collections::HashMap;

/// Relation URLs parsed from a `Link` header.
///
/// The header format is:
/// `<url>; rel="first", <url>; rel="next", <url>; rel="last"`
///
/// Every relation is retained; pagination only consults `first`, `next`
/// and `last`. A `LinkSet` belongs to the single response it was parsed from.
///
/// # Example
///
/// ```rust
/// use bandwidth_api::clients::LinkSet;
///
/// let links = LinkSet::parse(
///     r#"<http://x/list?page=0>; rel="first", <http://x/list?page=1>; rel="next""#,
/// );
/// assert_eq!(links.next(), Some("http://x/list?page=1"));
/// assert!(links.last().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: HashMap<String, String>,
}

impl LinkSet {
    /// Parses a `Link` header value.
    ///
    /// Malformed entries are skipped. When a relation appears twice the first
    /// occurrence wins.
    #[must_use]
    pub fn parse(header_value: &str) -> Self {
        let mut links = HashMap::new();
        let mut rest = header_value;

        while let Some(start) = rest.find('<') {
            let Some(len) = rest[start..].find('>') else {
                break;
            };
            let url = rest[start + 1..start + len].trim();
            let after = &rest[start + len + 1..];

            // Parameters run until the next entry's opening bracket
            let params_end = after.find('<').unwrap_or(after.len());
            let params = &after[..params_end];
            rest = &after[params_end..];

            let rels = params.split(';').find_map(|part| {
                let part = part.trim().trim_end_matches(',').trim();
                part.strip_prefix("rel=")
                    .map(|value| value.trim().trim_matches('"'))
            });

            if let Some(rels) = rels {
                if url.is_empty() {
                    continue;
                }
                for rel in rels.split_whitespace() {
                    links
                        .entry(rel.to_ascii_lowercase())
                        .or_insert_with(|| url.to_string());
                }
            }
        }

        Self { links }
    }

    /// Returns the URL for an arbitrary relation.
    #[must_use]
    pub fn get(&self, rel: &str) -> Option<&str> {
        self.links.get(rel).map(String::as_str)
    }

    /// Returns the `first` relation URL.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.get("first")
    }

    /// Returns the `next` relation URL.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.get("next")
    }

    /// Returns the `last` relation URL.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.get("last")
    }

    /// Returns the number of relations parsed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` if no relation was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// An HTTP response as received from the transport.
///
/// Header names are stored lower-cased; a header may carry several values.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body, `None` when empty.
    pub body: Option<Vec<u8>>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, normalizing header names and empty bodies.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Option<Vec<u8>>) -> Self {
        let headers = headers
            .into_iter()
            .fold(HashMap::new(), |mut acc: HashMap<String, Vec<String>>, (k, v)| {
                acc.entry(k.to_ascii_lowercase()).or_default().extend(v);
                acc
            });
        let body = body.filter(|b| !b.is_empty());

        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns the first value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Link` relations of this response.
    ///
    /// Multiple `Link` headers are merged in the order received.
    #[must_use]
    pub fn links(&self) -> LinkSet {
        self.headers
            .get("link")
            .map(|values| LinkSet::parse(&values.join(", ")))
            .unwrap_or_default()
    }

    /// Returns `true` if the response carries a `Link` header.
    #[must_use]
    pub fn has_links(&self) -> bool {
        self.headers.contains_key("link")
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }
}
