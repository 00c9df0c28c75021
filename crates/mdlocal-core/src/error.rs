//! Error taxonomy for cloning a document.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::FetchError;

/// Failure while cloning a single document (or setting up a run).
///
/// `PathNotFound` and `InvalidPattern` abort the whole run. The other variants
/// abort the current document only; the batch driver records them and moves on
/// to the next file.
#[derive(Debug, Error)]
pub enum CloneError {
    #[error("markdown path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("invalid selector pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("build link rewriter")]
    Rewriter(#[source] regex::Error),

    #[error("download failed: {url}")]
    Network {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("{op} {}", .path.display())]
    FileSystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CloneError {
    pub(crate) fn fs(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        CloneError::FileSystem {
            op,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CloneError>;
