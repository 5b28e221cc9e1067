//! Manifest data model and the episode numbering rule.

use serde::Deserialize;

/// A parsed series manifest.
///
/// `name` is the display name used to build output paths; it may differ
/// from the catalog key the manifest was looked up under. Unknown fields
/// written by the upstream scraper (`failedEps` and friends) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesManifest {
    /// Display name used for the destination directory and file names.
    pub name: String,
    /// Episode links, in episode order.
    pub links: Vec<LinkEntry>,
}

/// One downloadable episode link.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkEntry {
    /// Direct download URL.
    pub url: String,
    /// Referrer the host requires to serve the URL.
    pub referrer: String,
    /// Explicit episode number, when the scraper recorded one.
    #[serde(default)]
    pub ep: Option<u64>,
}

impl LinkEntry {
    /// Returns the episode number for this link.
    ///
    /// The explicit `ep` field wins when present; otherwise the caller's
    /// 1-based position of the link within the manifest is used.
    #[must_use]
    pub fn episode_number(&self, position: u64) -> u64 {
        self.ep.unwrap_or(position)
    }
}
