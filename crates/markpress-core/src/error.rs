//! Error types for the markpress filters

/// Result type alias using [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Main error type for the markpress filters
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP header or response construction error
    #[error("HTTP error: {0}")]
    Http(#[from] http::Error),

    /// I/O error while materializing a body or encoding bytes
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Body transform error (e.g. an eligible body that is not valid UTF-8)
    #[error("Transform error: {0}")]
    Transform(String),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(String),

    /// Internal error (should not happen in production)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Convert error to HTTP status code
    pub fn to_status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::Http(_) => StatusCode::BAD_REQUEST,
            Error::Io(_)
            | Error::Transform(_)
            | Error::Middleware(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
