//! Download job derivation from a resolved manifest.

use std::path::{Component, Path, PathBuf};

use crate::manifest::SeriesManifest;

/// A fully derived, ready-to-submit download job.
///
/// Jobs are derived per run and never persisted; the catalog only records
/// whole-series completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    /// Direct download URL.
    pub url: String,
    /// Referrer header value required by the host.
    pub referrer: String,
    /// Directory the output file is written into.
    pub destination_dir: PathBuf,
    /// Output file name within `destination_dir`.
    pub filename: String,
}

impl DownloadJob {
    /// Returns the full output path for this job.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.destination_dir.join(&self.filename)
    }
}

/// Derives the ordered job list for a manifest.
///
/// One job per link, in link order. The output file name is
/// `"{name} -- ep {E}.mp4"` where `E` is the link's explicit episode
/// number when present, else its 1-based position. The destination is
/// `{download_root}/{name}`. The display name is passed through
/// [`sanitize_component`] before it becomes a path component.
#[must_use]
pub fn build_jobs(manifest: &SeriesManifest, download_root: &Path) -> Vec<DownloadJob> {
    let display = sanitize_component(&manifest.name);
    let destination_dir = download_root.join(&display);

    (1u64..)
        .zip(manifest.links.iter())
        .map(|(position, link)| {
            let episode = link.episode_number(position);
            DownloadJob {
                url: link.url.clone(),
                referrer: link.referrer.clone(),
                destination_dir: destination_dir.clone(),
                filename: format!("{display} -- ep {episode}.mp4"),
            }
        })
        .collect()
}

/// Replaces filesystem-hazard characters in a display name.
///
/// Only separators and control characters are rewritten, so ordinary
/// display names pass through unchanged and the derived file name keeps
/// the manifest's exact spelling. Dot-only names would escape or hide
/// inside the download root and are rewritten too.
#[must_use]
pub(crate) fn sanitize_component(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() || !is_plain_segment(&sanitized) {
        return "_".to_string();
    }

    sanitized
}

fn is_plain_segment(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::manifest::LinkEntry;

    fn manifest(name: &str, links: Vec<LinkEntry>) -> SeriesManifest {
        SeriesManifest {
            name: name.to_string(),
            links,
        }
    }

    fn link(url: &str, referrer: &str, ep: Option<u64>) -> LinkEntry {
        LinkEntry {
            url: url.to_string(),
            referrer: referrer.to_string(),
            ep,
        }
    }

    #[test]
    fn test_build_jobs_one_per_link_in_order() {
        let manifest = manifest(
            "Foo",
            vec![link("u1", "r1", None), link("u2", "r2", None), link("u3", "r3", None)],
        );
        let jobs = build_jobs(&manifest, Path::new("/downloads"));

        assert_eq!(jobs.len(), 3);
        assert_eq!(
            jobs.iter().map(|j| j.url.as_str()).collect::<Vec<_>>(),
            vec!["u1", "u2", "u3"]
        );
    }

    #[test]
    fn test_build_jobs_positional_numbering_is_one_based() {
        let manifest = manifest("Foo", vec![link("u1", "r1", None), link("u2", "r2", None)]);
        let jobs = build_jobs(&manifest, Path::new("/downloads"));

        assert_eq!(jobs[0].filename, "Foo -- ep 1.mp4");
        assert_eq!(jobs[1].filename, "Foo -- ep 2.mp4");
    }

    #[test]
    fn test_build_jobs_explicit_episode_wins() {
        // Mixed numbering: positional first link, explicit ep=5 on the
        // second.
        let manifest = manifest("Foo", vec![link("u1", "r1", None), link("u2", "r2", Some(5))]);
        let jobs = build_jobs(&manifest, Path::new("/downloads"));

        assert_eq!(jobs[0].filename, "Foo -- ep 1.mp4");
        assert_eq!(jobs[1].filename, "Foo -- ep 5.mp4");
        assert_eq!(jobs[0].referrer, "r1");
        assert_eq!(jobs[1].referrer, "r2");
    }

    #[test]
    fn test_build_jobs_destination_is_root_joined_with_name() {
        let manifest = manifest("Foo", vec![link("u1", "r1", None)]);
        let jobs = build_jobs(&manifest, Path::new("/downloads"));

        assert_eq!(jobs[0].destination_dir, PathBuf::from("/downloads/Foo"));
        assert_eq!(
            jobs[0].output_path(),
            PathBuf::from("/downloads/Foo/Foo -- ep 1.mp4")
        );
    }

    #[test]
    fn test_build_jobs_empty_manifest_yields_no_jobs() {
        let manifest = manifest("Foo", vec![]);
        assert!(build_jobs(&manifest, Path::new("/downloads")).is_empty());
    }

    #[test]
    fn test_sanitize_component_passes_ordinary_names() {
        assert_eq!(sanitize_component("Foo"), "Foo");
        assert_eq!(sanitize_component("My Show - Season 2"), "My Show - Season 2");
        assert_eq!(sanitize_component("日本語タイトル"), "日本語タイトル");
    }

    #[test]
    fn test_sanitize_component_rewrites_separators() {
        assert_eq!(sanitize_component("a/b"), "a_b");
        assert_eq!(sanitize_component("a\\b"), "a_b");
    }

    #[test]
    fn test_sanitize_component_rejects_dot_segments() {
        assert_eq!(sanitize_component(".."), "_");
        assert_eq!(sanitize_component("."), "_");
        assert_eq!(sanitize_component(""), "_");
    }

    #[test]
    fn test_build_jobs_traversal_name_stays_under_root() {
        let manifest = manifest("../escape", vec![link("u1", "r1", None)]);
        let jobs = build_jobs(&manifest, Path::new("/downloads"));

        assert!(jobs[0].destination_dir.starts_with("/downloads"));
        assert!(
            !jobs[0]
                .destination_dir
                .components()
                .any(|c| c == Component::ParentDir)
        );
    }
}
