//! Gzip response compression filter
//!
//! Byte-level compression for buffered responses. When composed with the
//! minification filters through [`crate::builder::MiddlewareBuilder`], this
//! filter always sits outside them, so compressed output is
//! minified-then-gzipped.

use async_trait::async_trait;
use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;
use http::{header, HeaderValue, Request, Response};
use markpress_core::{Body, Middleware, Next, Result};
use std::fmt;
use std::io::{Read, Write};

/// Gzip filter configuration
#[derive(Debug, Clone)]
pub struct GzipConfig {
    /// Minimum response size to compress (bytes)
    pub min_size: usize,
    /// Content-type prefixes to compress
    pub content_types: Vec<String>,
    /// Compression level (0-9, higher = better compression but slower)
    pub level: u32,
}

impl Default for GzipConfig {
    fn default() -> Self {
        Self {
            min_size: 1024, // 1 KB
            content_types: vec![
                "text/".to_string(),
                "application/json".to_string(),
                "application/javascript".to_string(),
                "application/xml".to_string(),
            ],
            level: 6,
        }
    }
}

/// Gzip compression middleware
///
/// Compresses responses based on:
/// - Client's Accept-Encoding header
/// - Response Content-Type
/// - Response size
///
/// Streamed responses and responses that already carry a
/// `Content-Encoding` pass through untouched.
#[derive(Clone)]
pub struct Gzip {
    config: GzipConfig,
}

impl Gzip {
    /// Create a new Gzip middleware with default config
    pub fn new() -> Self {
        Self::with_config(GzipConfig::default())
    }

    /// Create a new Gzip middleware with custom config
    pub fn with_config(config: GzipConfig) -> Self {
        Self { config }
    }

    fn client_accepts_gzip(accept_encoding: Option<&HeaderValue>) -> bool {
        accept_encoding
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase().contains("gzip"))
            .unwrap_or(false)
    }

    fn matches_content_type(&self, response: &Response<Body>) -> bool {
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(|ct| {
                self.config
                    .content_types
                    .iter()
                    .any(|prefix| ct.starts_with(prefix.as_str()))
            })
            .unwrap_or(false)
    }

    fn should_compress(&self, response: &Response<Body>) -> bool {
        if response.headers().contains_key(header::CONTENT_ENCODING) {
            return false;
        }
        if !self.matches_content_type(response) {
            return false;
        }
        match response.body().len() {
            Some(len) => len >= self.config.min_size,
            // Streamed body, length unknown
            None => false,
        }
    }
}

impl Default for Gzip {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Gzip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gzip")
            .field("min_size", &self.config.min_size)
            .field("level", &self.config.level)
            .finish()
    }
}

#[async_trait]
impl Middleware for Gzip {
    async fn call(&self, req: Request<Body>, next: Next) -> Result<Response<Body>> {
        let accept_encoding = req.headers().get(header::ACCEPT_ENCODING).cloned();

        let response = next.run(req).await?;

        if !Self::client_accepts_gzip(accept_encoding.as_ref()) {
            return Ok(response);
        }
        if !self.should_compress(&response) {
            return Ok(response);
        }

        let (mut parts, body) = response.into_parts();
        let original = body.collect().await?;
        let compressed = gzip(&original, self.config.level)?;
        tracing::debug!(
            original_len = original.len(),
            compressed_len = compressed.len(),
            "gzipped response body"
        );

        parts
            .headers
            .insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        parts
            .headers
            .insert(header::CONTENT_LENGTH, HeaderValue::from(compressed.len()));
        parts
            .headers
            .append(header::VARY, HeaderValue::from_static("Accept-Encoding"));
        Ok(Response::from_parts(parts, Body::Full(compressed)))
    }
}

/// Gzip a byte slice at the given compression level
pub fn gzip(input: &[u8], level: u32) -> Result<Bytes> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(input)?;
    Ok(Bytes::from(encoder.finish()?))
}

/// Decompress a gzipped byte slice
pub fn gunzip(input: &[u8]) -> Result<Bytes> {
    let mut decoder = flate2::read::GzDecoder::new(input);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(Bytes::from(out))
}
