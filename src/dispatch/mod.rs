//! Job derivation and the sequential dispatch pass.

mod job;
mod runner;

pub use job::{DownloadJob, build_jobs};
pub use runner::{Dispatcher, RunSummary, SeriesPlan};
