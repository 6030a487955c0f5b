//! # Markpress Core
//!
//! Core types, traits, and error handling for the markpress filter collection.
//!
//! This crate provides the foundational abstractions used by the filters:
//! - Response body representation (buffered or streamed)
//! - Middleware trait and chain
//! - Error types
//! - Response construction helpers

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod body;
pub mod error;
pub mod middleware;
pub mod response;

pub use body::Body;
pub use error::{Error, Result};
pub use middleware::{HandlerFn, Middleware, Next};
pub use response::ResponseBuilder;

// Re-export commonly used HTTP types
pub use bytes::Bytes;
pub use http::{Method, Request, Response, StatusCode};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::body::Body;
    pub use crate::error::{Error, Result};
    pub use crate::middleware::{Middleware, Next};
    pub use crate::response::ResponseBuilder;
}
