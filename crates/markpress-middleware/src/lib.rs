//! # Markpress Middleware
//!
//! Response-rewriting filters for HTTP middleware chains:
//! - HTML and XML minification (comment removal, intertag spaces,
//!   protocol-relative URLs, whitespace collapsing)
//! - Gzip compression
//! - An ordered chain builder that keeps minification innermost so
//!   responses are always minified before they are compressed
//!
//! Eligibility rules: only buffered responses with a matching media type
//! and no existing `Content-Encoding` are rewritten. Chunked or streamed
//! responses, and responses of any other content type, pass through
//! byte-for-byte.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod builder;
pub mod compression;
pub mod compressor;
pub mod minify;

pub use builder::MiddlewareBuilder;
pub use compression::{gunzip, gzip, Gzip, GzipConfig};
pub use compressor::{HtmlCompressor, MarkupCompressor, MinifyConfig, XmlCompressor};
pub use minify::{HtmlMinify, XmlMinify};

// Re-export core middleware types from markpress-core
pub use markpress_core::{Body, Error, Middleware, Next, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::builder::MiddlewareBuilder;
    pub use crate::compression::{Gzip, GzipConfig};
    pub use crate::compressor::{MarkupCompressor, MinifyConfig};
    pub use crate::minify::{HtmlMinify, XmlMinify};
    pub use markpress_core::{Body, Error, Middleware, Next, Result};
}
