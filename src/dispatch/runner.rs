//! The sequential dispatch pass.
//!
//! One pass walks the catalog in order, expands every pending series into
//! its job list, and hands each job to the engine. Series are processed
//! strictly one after another, and jobs within a series strictly in link
//! order; nothing runs concurrently.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::job::{DownloadJob, build_jobs};
use crate::catalog::SeriesEntry;
use crate::engine::Engine;
use crate::manifest::{ManifestError, ManifestResolver};

/// Counters reported after a completed pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Series whose jobs were all submitted this pass.
    pub series_processed: usize,
    /// Series skipped because they were already downloaded.
    pub series_skipped: usize,
    /// Job submissions attempted, including rejected ones.
    pub jobs_submitted: usize,
    /// Submissions the engine returned an error for.
    pub submit_failures: usize,
}

/// The planned work for one pending series, as produced by
/// [`Dispatcher::plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPlan {
    /// Catalog name of the series.
    pub series: String,
    /// Jobs that a run would submit, in submission order.
    pub jobs: Vec<DownloadJob>,
}

/// Drives a full catalog pass against an injected engine.
pub struct Dispatcher {
    resolver: ManifestResolver,
    engine: Arc<dyn Engine>,
    download_root: PathBuf,
}

impl Dispatcher {
    /// Creates a dispatcher.
    ///
    /// The engine handle is injected rather than constructed here so tests
    /// can substitute a fake and observe submissions.
    #[must_use]
    pub fn new(
        resolver: ManifestResolver,
        engine: Arc<dyn Engine>,
        download_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            resolver,
            engine,
            download_root: download_root.into(),
        }
    }

    /// Runs one dispatch pass over `entries`, in catalog order.
    ///
    /// Entries already marked downloaded are skipped without touching the
    /// resolver or the engine. For each pending entry the manifest is
    /// resolved, every derived job is submitted, and the entry is marked
    /// downloaded in memory once its last job has been handed over. An
    /// engine error fails that one submission only; the series still
    /// completes. Persisting the updated catalog is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when any pending entry's manifest cannot
    /// be resolved. The pass stops at that entry; earlier entries keep
    /// their in-memory completion marks, but since the error propagates to
    /// the caller the catalog must not be saved.
    #[instrument(skip(self, entries), fields(entries = entries.len()))]
    pub async fn run(&self, entries: &mut [SeriesEntry]) -> Result<RunSummary, ManifestError> {
        let mut summary = RunSummary::default();
        info!("starting dispatch pass");

        for entry in entries.iter_mut() {
            if entry.downloaded {
                debug!(series = %entry.name, "already downloaded, skipping");
                summary.series_skipped += 1;
                continue;
            }

            let manifest = self.resolver.resolve(&entry.name)?;
            let jobs = build_jobs(&manifest, &self.download_root);
            debug!(
                series = %entry.name,
                display_name = %manifest.name,
                jobs = jobs.len(),
                "series expanded"
            );

            for job in &jobs {
                summary.jobs_submitted += 1;
                if let Err(error) = self.engine.submit(job, false).await {
                    // Submission outcome does not gate completion marking;
                    // the failure is surfaced here and in the summary only.
                    warn!(
                        series = %entry.name,
                        url = %job.url,
                        error = %error,
                        "engine rejected submission"
                    );
                    summary.submit_failures += 1;
                }
            }

            entry.mark_downloaded();
            summary.series_processed += 1;
            info!(series = %entry.name, jobs = jobs.len(), "series dispatched");
        }

        info!(
            processed = summary.series_processed,
            skipped = summary.series_skipped,
            jobs = summary.jobs_submitted,
            failures = summary.submit_failures,
            "dispatch pass complete"
        );
        Ok(summary)
    }

    /// Returns the jobs a run over `entries` would submit, without side
    /// effects.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] when a pending entry's manifest cannot be
    /// resolved, exactly as [`Self::run`] would.
    pub fn plan(&self, entries: &[SeriesEntry]) -> Result<Vec<SeriesPlan>, ManifestError> {
        entries
            .iter()
            .filter(|entry| !entry.downloaded)
            .map(|entry| {
                let manifest = self.resolver.resolve(&entry.name)?;
                Ok(SeriesPlan {
                    series: entry.name.clone(),
                    jobs: build_jobs(&manifest, &self.download_root),
                })
            })
            .collect()
    }
}
