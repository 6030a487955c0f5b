//! Response builder and utilities

use crate::{Body, Result};
use bytes::Bytes;
use futures::stream::Stream;
use http::{header, Response, StatusCode};
use std::io;

/// Response builder for convenient response construction
#[derive(Debug)]
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(header::HeaderName, String)>,
}

impl ResponseBuilder {
    /// Create a new response builder
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
        }
    }

    /// Create a builder for a 200 OK response
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// Set a header
    pub fn header(mut self, name: header::HeaderName, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Build response with empty body
    pub fn build(self) -> Result<Response<Body>> {
        self.body(None, Body::empty())
    }

    /// Build response with text body
    pub fn text(self, body: impl Into<Bytes>) -> Result<Response<Body>> {
        self.buffered("text/plain", body)
    }

    /// Build response with HTML body
    pub fn html(self, body: impl Into<Bytes>) -> Result<Response<Body>> {
        self.buffered("text/html", body)
    }

    /// Build response with XML body
    pub fn xml(self, body: impl Into<Bytes>) -> Result<Response<Body>> {
        self.buffered("application/xml", body)
    }

    /// Build a chunked response from a byte-chunk stream.
    ///
    /// Sets `Transfer-Encoding: chunked` and no `Content-Length`.
    pub fn chunked<S>(self, content_type: &str, stream: S) -> Result<Response<Body>>
    where
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        self.header(header::TRANSFER_ENCODING, "chunked")
            .body(Some(content_type), Body::streamed(stream))
    }

    fn buffered(self, content_type: &str, body: impl Into<Bytes>) -> Result<Response<Body>> {
        let bytes = body.into();
        let len = bytes.len();
        self.header(header::CONTENT_LENGTH, len.to_string())
            .body(Some(content_type), Body::Full(bytes))
    }

    fn body(self, content_type: Option<&str>, body: Body) -> Result<Response<Body>> {
        let mut response = Response::builder().status(self.status);

        // An explicitly set Content-Type wins over the constructor default.
        let has_content_type = self
            .headers
            .iter()
            .any(|(name, _)| name == header::CONTENT_TYPE);
        if let Some(ct) = content_type {
            if !has_content_type {
                response = response.header(header::CONTENT_TYPE, ct);
            }
        }
        for (name, value) in self.headers {
            response = response.header(name, value);
        }

        Ok(response.body(body)?)
    }
}
