//! Catalog record type.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single series record in the catalog.
///
/// `name` doubles as the manifest lookup key: the manifest for this series
/// lives at `{manifest_dir}/{name}.json`. Fields beyond `name` and
/// `downloaded` (the scraper records a `timestamp`, for example) are
/// preserved verbatim across a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    /// Series identifier; must match a manifest file name.
    pub name: String,
    /// True once every job for this series has been submitted.
    pub downloaded: bool,
    /// Extra catalog fields carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SeriesEntry {
    /// Creates a fresh, not-yet-downloaded entry.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            downloaded: false,
            extra: Map::new(),
        }
    }

    /// Flips the completion flag.
    ///
    /// This is the only mutation a run performs on an entry; the flag never
    /// transitions back to false.
    pub fn mark_downloaded(&mut self) {
        self.downloaded = true;
    }
}

impl fmt::Display for SeriesEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SeriesEntry {{ name: {}, downloaded: {} }}",
            self.name, self.downloaded
        )
    }
}
