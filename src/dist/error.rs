//! Error types for pipeline operations.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all pipeline operations
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem operation failure annotated with the operation and path
    #[error("{op} {}: {source}", path.display())]
    Fs {
        /// What was being done when the error occurred
        op: &'static str,
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Plain IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid example glob pattern
    #[error("invalid example pattern `{pattern}`: {source}")]
    Pattern {
        /// The offending pattern
        pattern: String,
        /// Underlying glob error
        source: glob::PatternError,
    },

    /// Archive creation or finalization failure
    #[error("archive {}: {source}", path.display())]
    Archive {
        /// Path of the archive being written
        path: PathBuf,
        /// Underlying zip error
        source: zip::result::ZipError,
    },

    /// Generic errors
    #[error("{0}")]
    GenericError(String),
}

/// Extension trait for annotating raw IO errors with operation context.
pub trait ErrorExt<T> {
    /// Wrap an IO error with the operation name and the path it touched.
    fn fs_context(self, op: &'static str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, op: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            op,
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Extension trait for turning absent values into pipeline errors.
pub trait Context<T> {
    /// Convert `None` into a [`Error::GenericError`] with the given message.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}
