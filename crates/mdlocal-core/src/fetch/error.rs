//! Download error type.

use thiserror::Error;

/// Error returned by a single image download (curl failure, HTTP error, or local write failure).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, DNS, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the body to disk failed.
    #[error("storage: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Curl(e) if e.is_operation_timedout())
    }
}
