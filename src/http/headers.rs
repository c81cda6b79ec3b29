//! Immutable per-request header sets.
//!
//! Headers are never installed on the client as defaults: every call site
//! receives a [`RequestHeaders`] value and derives new values from it. A
//! direct-download redirect therefore only has to hand out
//! [`RequestHeaders::stripped`] for the storage request to carry no custom
//! header at all.

use crate::error::{Error, Result};

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, IntoHeaderName, AUTHORIZATION, CONTENT_TYPE, RANGE,
};

/// `Prefer` header asking the API to answer long extractions asynchronously.
pub const PREFER: HeaderName = HeaderName::from_static("prefer");

/// Header asking the API to redirect result downloads to the backing store.
pub const X_DIRECT_DOWNLOAD: HeaderName = HeaderName::from_static("x-direct-download");

/// A set of headers attached to a single request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestHeaders {
    map: HeaderMap,
}

impl RequestHeaders {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Headers sent with every API call: JSON content and asynchronous
    /// processing.
    pub fn api() -> Self {
        Self::new()
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_header(PREFER, HeaderValue::from_static("respond-async"))
    }

    /// An empty header set, used for requests to a direct storage location.
    pub fn stripped() -> Self {
        Self::new()
    }

    /// Returns a copy carrying `Authorization: Token <token>`.
    pub fn with_token(&self, token: &str) -> Result<Self> {
        let value = HeaderValue::from_str(&format!("Token {}", token))
            .map_err(|e| Error::Internal(format!("Invalid token header: {}", e)))?;
        let mut headers = self.clone();
        headers.map.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// Returns a copy carrying `X-Direct-Download: true`.
    pub fn with_direct_download(&self) -> Self {
        self.clone()
            .with_header(X_DIRECT_DOWNLOAD, HeaderValue::from_static("true"))
    }

    /// Returns a copy carrying the given `Range` value.
    pub fn with_range(&self, range: &str) -> Result<Self> {
        let value = HeaderValue::from_str(range)
            .map_err(|e| Error::Internal(format!("Invalid range header {:?}: {}", range, e)))?;
        Ok(self.clone().with_header(RANGE, value))
    }

    /// Adds or replaces a header.
    pub fn with_header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.map.insert(name, value);
        self
    }

    /// Gets a header value.
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.map.get(name)
    }

    /// Number of headers in the set.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the set carries no header.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Gets the underlying map, to hand to a request builder.
    pub fn to_header_map(&self) -> HeaderMap {
        self.map.clone()
    }
}
