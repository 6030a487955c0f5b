//! Response body representation
//!
//! Bodies come in two shapes: fully buffered bytes, for which a content
//! length is known up front, and lazy chunk streams, for which it is not.
//! The filters in this workspace only ever rewrite buffered bodies; a
//! streamed body passes through untouched so backpressure is preserved.

use crate::{Error, Result};
use bytes::{Bytes, BytesMut};
use futures::stream::{BoxStream, Stream, StreamExt};
use std::fmt;
use std::io;

/// An HTTP response body, either fully buffered or streamed chunk-by-chunk.
pub enum Body {
    /// Fully materialized body with a known length
    Full(Bytes),
    /// Lazy sequence of byte chunks; no length is determinable
    Streamed(BoxStream<'static, io::Result<Bytes>>),
}

impl Body {
    /// Create an empty buffered body
    pub fn empty() -> Self {
        Body::Full(Bytes::new())
    }

    /// Create a buffered body from bytes
    pub fn full(bytes: impl Into<Bytes>) -> Self {
        Body::Full(bytes.into())
    }

    /// Create a streamed body from a chunk stream
    pub fn streamed<S>(stream: S) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        Body::Streamed(stream.boxed())
    }

    /// Whether this body is streamed
    pub fn is_streamed(&self) -> bool {
        matches!(self, Body::Streamed(_))
    }

    /// Byte length, if the body is buffered
    pub fn len(&self) -> Option<usize> {
        match self {
            Body::Full(bytes) => Some(bytes.len()),
            Body::Streamed(_) => None,
        }
    }

    /// Whether the body is buffered and empty
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Materialize the full body into memory.
    ///
    /// For a buffered body this is immediate. For a streamed body every
    /// chunk is read; a stream error is terminal and surfaces as
    /// [`Error::Io`].
    pub async fn collect(self) -> Result<Bytes> {
        match self {
            Body::Full(bytes) => Ok(bytes),
            Body::Streamed(mut stream) => {
                let mut buf = BytesMut::new();
                while let Some(chunk) = stream.next().await {
                    buf.extend_from_slice(&chunk.map_err(Error::Io)?);
                }
                Ok(buf.freeze())
            }
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::empty()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Full(bytes) => f.debug_tuple("Full").field(&bytes.len()).finish(),
            Body::Streamed(_) => f.write_str("Streamed"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Full(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Full(Bytes::from(bytes))
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::Full(Bytes::from(s))
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Body::Full(Bytes::from_static(s.as_bytes()))
    }
}
