//! Error types for apkg-maker
//!
//! Two kinds of failure reach a caller: input validation problems (client
//! errors) and anything that breaks package assembly (server errors).
//! Audio-resolution failures never become an [`Error`] at all; the media
//! resolver absorbs them and the affected card is produced without audio.

use thiserror::Error;

/// Result type alias for apkg-maker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for apkg-maker
#[derive(Debug, Error)]
pub enum Error {
    /// Request input failed validation (empty note list, blank required field)
    #[error("{0}")]
    Validation(String),

    /// I/O error while staging media or reading the packaged output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Collection database error
    #[error("collection error: {0}")]
    Collection(#[from] rusqlite::Error),

    /// Package archive error
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Serialization error (collection JSON blobs, media manifest)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client construction error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServer(String),

    /// Other error (blocking-task join failures and the like)
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP status code for this error.
    ///
    /// Validation failures are the caller's fault; everything else that
    /// escapes the pipeline is a server-side failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::Io(_)
            | Error::Collection(_)
            | Error::Archive(_)
            | Error::Serialization(_)
            | Error::Network(_)
            | Error::ApiServer(_)
            | Error::Other(_) => 500,
        }
    }
}
