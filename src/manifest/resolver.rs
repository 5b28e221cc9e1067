//! Series name to parsed manifest resolution.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use super::error::ManifestError;
use super::model::SeriesManifest;

/// Resolves catalog series names to parsed manifests.
///
/// Manifests live in a flat directory, one JSON file per series, named
/// after the catalog entry: `{dir}/{series_name}.json`. Resolution is a
/// pure read; the resolver never caches or mutates anything.
#[derive(Debug, Clone)]
pub struct ManifestResolver {
    dir: PathBuf,
}

impl ManifestResolver {
    /// Creates a resolver rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the manifest directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the manifest path for `series_name`.
    #[must_use]
    pub fn manifest_path(&self, series_name: &str) -> PathBuf {
        self.dir.join(format!("{series_name}.json"))
    }

    /// Loads and parses the manifest for `series_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::NotFound`] when no manifest file exists for
    /// the series, [`ManifestError::Corrupt`] when the file does not parse,
    /// and [`ManifestError::Io`] for any other read failure.
    #[instrument(skip(self), fields(series = %series_name))]
    pub fn resolve(&self, series_name: &str) -> Result<SeriesManifest, ManifestError> {
        let path = self.manifest_path(series_name);

        let contents = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ManifestError::not_found(series_name, &path)
            } else {
                ManifestError::io(&path, e)
            }
        })?;

        let manifest: SeriesManifest = serde_json::from_str(&contents)
            .map_err(|e| ManifestError::corrupt(&path, e.to_string()))?;

        debug!(
            display_name = %manifest.name,
            links = manifest.links.len(),
            "manifest resolved"
        );
        Ok(manifest)
    }
}
