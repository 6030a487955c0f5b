//! Middleware chain builder
//!
//! Builds an ordered middleware stack. Minification filters are
//! unconditionally placed innermost (closest to the handler), so a gzip
//! filter always sees minified bytes on the return path no matter the
//! registration order. Placing minification outside compression would feed
//! gzipped bytes to the markup engine, which is a defect, not a
//! configuration choice.

use crate::compression::{Gzip, GzipConfig};
use crate::compressor::MinifyConfig;
use crate::minify::{HtmlMinify, XmlMinify};
use markpress_core::Middleware;
use std::sync::Arc;

/// Middleware chain builder
#[derive(Debug, Default)]
pub struct MiddlewareBuilder {
    outer: Vec<Arc<dyn Middleware>>,
    minifiers: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareBuilder {
    /// Create a new middleware builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            outer: Vec::new(),
            minifiers: Vec::new(),
        }
    }

    /// Add the gzip compression filter with default config
    #[must_use]
    pub fn with_gzip(mut self) -> Self {
        self.outer.push(Arc::new(Gzip::new()));
        self
    }

    /// Add the gzip compression filter with custom configuration
    #[must_use]
    pub fn with_gzip_config(mut self, config: GzipConfig) -> Self {
        self.outer.push(Arc::new(Gzip::with_config(config)));
        self
    }

    /// Add the HTML minification filter with default options
    #[must_use]
    pub fn with_html_minify(mut self) -> Self {
        self.minifiers.push(Arc::new(HtmlMinify::new()));
        self
    }

    /// Add the HTML minification filter with custom options
    #[must_use]
    pub fn with_html_minify_config(mut self, config: MinifyConfig) -> Self {
        self.minifiers.push(Arc::new(HtmlMinify::with_config(config)));
        self
    }

    /// Add the HTML minification filter in development mode
    /// (line breaks preserved)
    #[must_use]
    pub fn with_html_minify_dev(mut self, config: MinifyConfig) -> Self {
        self.minifiers.push(Arc::new(HtmlMinify::dev(config)));
        self
    }

    /// Add the XML minification filter with default options
    #[must_use]
    pub fn with_xml_minify(mut self) -> Self {
        self.minifiers.push(Arc::new(XmlMinify::new()));
        self
    }

    /// Add the XML minification filter with custom options
    #[must_use]
    pub fn with_xml_minify_config(mut self, config: MinifyConfig) -> Self {
        self.minifiers.push(Arc::new(XmlMinify::with_config(config)));
        self
    }

    /// Add custom middleware (placed outside the minification filters)
    #[must_use]
    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.outer.push(middleware);
        self
    }

    /// Build the middleware chain.
    ///
    /// Minification filters come last in the stack, making them the
    /// innermost filters at run time.
    #[must_use]
    pub fn build(self) -> Arc<[Arc<dyn Middleware>]> {
        let mut stack = self.outer;
        stack.extend(self.minifiers);
        stack.into()
    }

    /// Get the number of middlewares in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.outer.len() + self.minifiers.len()
    }

    /// Check if the chain is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outer.is_empty() && self.minifiers.is_empty()
    }
}
