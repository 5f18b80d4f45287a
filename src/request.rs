//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http_body_util::BodyExt;

use crate::method::Method;

/// An incoming HTTP request with its body fully collected.
///
/// Headers are not kept: nothing downstream of the router reads them.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    #[cfg(test)]
    pub(crate) fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: Bytes::new(),
            params: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Converts a hyper request, buffering the whole body.
    ///
    /// Body-size limits belong to the fronting proxy; nothing is capped here.
    pub(crate) async fn from_hyper(
        method: Method,
        req: hyper::Request<hyper::body::Incoming>,
    ) -> Result<Self, hyper::Error> {
        let (parts, body) = req.into_parts();
        let body = body.collect().await?.to_bytes();
        Ok(Self {
            method,
            path: parts.uri.path().to_owned(),
            body,
            params: HashMap::new(),
        })
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/student/{id}`, `req.param("id")` on `/student/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parses the body as an untyped JSON value.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
