//! Markup minification filters
//!
//! `HtmlMinify` and `XmlMinify` rewrite eligible response bodies through a
//! [`MarkupCompressor`] on the return path of the middleware chain. A
//! response is eligible when its media type matches the filter's targets,
//! the body is buffered (not chunked/streamed), and no `Content-Encoding`
//! is present. Everything else passes through byte-for-byte.

use crate::compressor::{HtmlCompressor, MarkupCompressor, MinifyConfig, XmlCompressor};
use async_trait::async_trait;
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Request, Response};
use markpress_core::{Body, Error, Middleware, Next, Result};
use std::fmt;
use std::sync::Arc;

const HTML_TARGETS: &[&str] = &["text/html"];
const XML_TARGETS: &[&str] = &["application/xml", "text/xml"];

/// Shared transform core for both filter variants
struct TransformFilter {
    targets: &'static [&'static str],
    compressor: Arc<dyn MarkupCompressor>,
}

impl TransformFilter {
    /// Media type of the response, lowercased, without parameters
    fn media_type(headers: &HeaderMap) -> Option<String> {
        let content_type = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
        let media_type = content_type.split(';').next()?.trim();
        if media_type.is_empty() {
            None
        } else {
            Some(media_type.to_ascii_lowercase())
        }
    }

    fn is_chunked(response: &Response<Body>) -> bool {
        let header_chunked = response
            .headers()
            .get(header::TRANSFER_ENCODING)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase().contains("chunked"))
            .unwrap_or(false);
        header_chunked || response.body().is_streamed()
    }

    fn is_eligible(&self, response: &Response<Body>) -> bool {
        match Self::media_type(response.headers()) {
            Some(media_type) if self.targets.contains(&media_type.as_str()) => {}
            _ => {
                tracing::debug!("skipping minification: content type does not match");
                return false;
            }
        }
        if Self::is_chunked(response) {
            tracing::debug!("skipping minification: response is chunked");
            return false;
        }
        if response.headers().contains_key(header::CONTENT_ENCODING) {
            tracing::debug!("skipping minification: response is already content-encoded");
            return false;
        }
        true
    }

    async fn apply(&self, req: Request<Body>, next: Next) -> Result<Response<Body>> {
        let response = next.run(req).await?;

        if !self.is_eligible(&response) {
            return Ok(response);
        }

        let (mut parts, body) = response.into_parts();
        let original = body.collect().await?;
        let markup = std::str::from_utf8(&original)
            .map_err(|_| Error::Transform("eligible response body is not valid UTF-8".to_string()))?;

        let minified = Bytes::from(self.compressor.compress(markup));
        tracing::debug!(
            original_len = original.len(),
            minified_len = minified.len(),
            "minified response body"
        );

        parts
            .headers
            .insert(header::CONTENT_LENGTH, HeaderValue::from(minified.len()));
        Ok(Response::from_parts(parts, Body::Full(minified)))
    }
}

impl fmt::Debug for TransformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformFilter")
            .field("targets", &self.targets)
            .field("compressor", &self.compressor)
            .finish()
    }
}

/// HTML minification filter, targeting `text/html` responses
pub struct HtmlMinify {
    inner: TransformFilter,
}

impl HtmlMinify {
    /// Create an HTML minification filter with default options
    pub fn new() -> Self {
        Self::with_config(MinifyConfig::html())
    }

    /// Create an HTML minification filter with custom options
    pub fn with_config(config: MinifyConfig) -> Self {
        Self::with_compressor(Arc::new(HtmlCompressor::with_config(config)))
    }

    /// Create an HTML minification filter for development mode.
    ///
    /// Forces `preserve_line_breaks` so minified pages stay readable.
    pub fn dev(mut config: MinifyConfig) -> Self {
        config.preserve_line_breaks = true;
        Self::with_config(config)
    }

    /// Create an HTML minification filter with a custom compressor engine
    pub fn with_compressor(compressor: Arc<dyn MarkupCompressor>) -> Self {
        Self {
            inner: TransformFilter {
                targets: HTML_TARGETS,
                compressor,
            },
        }
    }
}

impl Default for HtmlMinify {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HtmlMinify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlMinify")
            .field("targets", &self.inner.targets)
            .finish()
    }
}

#[async_trait]
impl Middleware for HtmlMinify {
    async fn call(&self, req: Request<Body>, next: Next) -> Result<Response<Body>> {
        self.inner.apply(req, next).await
    }
}

/// XML minification filter, targeting `application/xml` and `text/xml`
/// responses
pub struct XmlMinify {
    inner: TransformFilter,
}

impl XmlMinify {
    /// Create an XML minification filter with default options
    pub fn new() -> Self {
        Self::with_config(MinifyConfig::xml())
    }

    /// Create an XML minification filter with custom options
    pub fn with_config(config: MinifyConfig) -> Self {
        Self::with_compressor(Arc::new(XmlCompressor::with_config(config)))
    }

    /// Create an XML minification filter with a custom compressor engine
    pub fn with_compressor(compressor: Arc<dyn MarkupCompressor>) -> Self {
        Self {
            inner: TransformFilter {
                targets: XML_TARGETS,
                compressor,
            },
        }
    }
}

impl Default for XmlMinify {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for XmlMinify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlMinify")
            .field("targets", &self.inner.targets)
            .finish()
    }
}

#[async_trait]
impl Middleware for XmlMinify {
    async fn call(&self, req: Request<Body>, next: Next) -> Result<Response<Body>> {
        self.inner.apply(req, next).await
    }
}
