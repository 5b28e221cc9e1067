//! Error types for manifest resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving a series manifest.
///
/// Every variant is fatal to a dispatch run: the loop has no per-series
/// error isolation, so a failed resolution aborts the pass and the catalog
/// is never saved.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// No manifest file exists for the requested series.
    #[error(
        "no manifest found for series '{series}' at {path}\n  Suggestion: Check the catalog entry name against the manifest directory contents"
    )]
    NotFound {
        /// The series name that was looked up.
        series: String,
        /// The path that was probed.
        path: PathBuf,
    },

    /// The manifest file exists but does not parse.
    #[error("manifest {path} is corrupt: {message}")]
    Corrupt {
        /// Path of the offending manifest file.
        path: PathBuf,
        /// Parser error text.
        message: String,
    },

    /// Filesystem failure other than a missing file.
    #[error("IO error reading manifest {path}: {source}")]
    Io {
        /// Path where the failure occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Creates a `NotFound` error.
    pub fn not_found(series: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            series: series.into(),
            path: path.into(),
        }
    }

    /// Creates a `Corrupt` error for an unparseable manifest.
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
