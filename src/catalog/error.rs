//! Error types for catalog operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or saving the series catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file exists but does not parse as a catalog.
    #[error(
        "catalog {path} is corrupt: {message}\n  Suggestion: Restore the file from a backup or re-create it as a JSON array of {{\"name\", \"downloaded\"}} records"
    )]
    Corrupt {
        /// Path of the offending catalog file.
        path: PathBuf,
        /// Parser error text.
        message: String,
    },

    /// Filesystem failure while reading or writing the catalog.
    #[error("IO error accessing catalog {path}: {source}")]
    Io {
        /// Path where the failure occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Creates a `Corrupt` error for an unparseable catalog file.
    pub fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an `Io` error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
