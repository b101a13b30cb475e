//! HTTP GET abstraction used by the data source.
//!
//! The data source never talks to the network itself: it builds a
//! [`GetRequest`] and hands it to an [`HttpGet`] implementation. The
//! `google` feature ships a reqwest-backed one; tests plug in recorders.

use std::future::Future;
use std::pin::Pin;

use crate::error::SourceResult;

/// A boxed future for async trait methods.
///
/// Boxing keeps [`HttpGet`] and [`crate::AccessTokenProvider`] object safe so
/// the data source can hold them behind `Arc<dyn ...>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A single GET against the directory API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    /// API root, e.g. `https://www.googleapis.com/admin/directory/v1`.
    pub base_url: String,
    /// Resource path starting with `/`. Segments are used exactly as given.
    pub path: String,
    /// Query pairs in transmission order.
    pub query: Vec<(String, String)>,
}

impl GetRequest {
    pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// The full URL without the query string.
    ///
    /// Base and path are concatenated verbatim; only a trailing `/` on the
    /// base is dropped so that `base/` and `base` behave the same.
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path)
    }

    /// Looks up a query value by key.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Query keys in transmission order.
    pub fn query_keys(&self) -> Vec<&str> {
        self.query.iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// Performs HTTP GET requests and decodes JSON bodies.
///
/// Implementations own timeouts, TLS and cancellation. Errors are returned to
/// the caller of the data source untouched.
pub trait HttpGet: Send + Sync {
    fn get(&self, request: GetRequest) -> BoxFuture<'_, SourceResult<serde_json::Value>>;
}
