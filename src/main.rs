//! CLI entry point for the seriesdl tool.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use seriesdl_core::{CatalogStore, Dispatcher, HttpEngine, ManifestResolver};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("seriesdl starting");

    let store = CatalogStore::new(&args.catalog);
    let resolver = ManifestResolver::new(&args.manifest_dir);
    let engine = Arc::new(HttpEngine::with_timeouts(
        args.connect_timeout,
        args.read_timeout,
    ));
    let dispatcher = Dispatcher::new(resolver, engine, &args.download_root);

    let mut entries = store.load().context("failed to load series catalog")?;
    let pending = entries.iter().filter(|e| !e.downloaded).count();
    info!(
        series = entries.len(),
        pending,
        "catalog loaded"
    );

    if args.dry_run {
        let plans = dispatcher
            .plan(&entries)
            .context("failed to plan dispatch")?;
        if plans.is_empty() {
            println!("nothing to do: every series is already downloaded");
            return Ok(());
        }
        for plan in &plans {
            println!("{}:", plan.series);
            for job in &plan.jobs {
                println!("  {} -> {}", job.url, job.output_path().display());
            }
        }
        return Ok(());
    }

    let summary = dispatcher
        .run(&mut entries)
        .await
        .context("dispatch aborted")?;

    store
        .save(&entries)
        .context("failed to persist series catalog")?;

    info!(
        processed = summary.series_processed,
        skipped = summary.series_skipped,
        jobs = summary.jobs_submitted,
        failures = summary.submit_failures,
        "run complete"
    );

    Ok(())
}
