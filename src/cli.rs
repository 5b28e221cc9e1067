//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Batch dispatcher for per-episode series downloads.
///
/// seriesdl walks the series catalog, expands every pending series into
/// its per-episode download jobs, hands each job to the download engine,
/// and records completion back to the catalog.
#[derive(Parser, Debug)]
#[command(name = "seriesdl")]
#[command(author, version, about)]
pub struct Args {
    /// Path to the series catalog file
    #[arg(short = 'C', long, default_value = "cache/catalog.json")]
    pub catalog: PathBuf,

    /// Directory holding one manifest JSON file per series
    #[arg(short = 'm', long, default_value = "series")]
    pub manifest_dir: PathBuf,

    /// Root directory downloads are organized under
    #[arg(short = 'o', long, default_value = "downloads")]
    pub download_root: PathBuf,

    /// HTTP connect timeout in seconds (1-300)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub connect_timeout: u64,

    /// HTTP read timeout in seconds (1-7200)
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u64).range(1..=7200))]
    pub read_timeout: u64,

    /// List the jobs a run would submit, without downloading or saving anything
    #[arg(long)]
    pub dry_run: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
