//! Error types for the showcase.

use thiserror::Error;

/// Common error type for the showcase.
///
/// Feed-level failures never surface as this type; they are absorbed by the
/// fetcher (see [`crate::feed::FetchFailure`]) and end in the fallback list.
#[derive(Error, Debug)]
pub enum ShowcaseError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client error.
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Web server error.
    #[error("server error: {0}")]
    Server(String),

    /// The page could not be rendered.
    #[error("render error: {0}")]
    Render(String),
}

/// Result type alias for showcase operations.
pub type Result<T> = std::result::Result<T, ShowcaseError>;
