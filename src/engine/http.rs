//! Streaming HTTP engine.
//!
//! Performs one sequential transfer per submitted job: GET the URL with
//! the job's referrer header, stream the body to the output file. One
//! attempt per job; recovery from transfer failures is out of scope for
//! the orchestrator and stays out of scope here.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::REFERER;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::Engine;
use super::error::EngineError;
use crate::dispatch::DownloadJob;

/// Default connect timeout in seconds.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default read timeout in seconds; whole episodes take a while.
const READ_TIMEOUT_SECS: u64 = 600;

/// Download engine backed by a shared reqwest client.
///
/// The client is built once and reused across submissions to benefit from
/// connection pooling.
#[derive(Debug, Clone)]
pub struct HttpEngine {
    client: Client,
}

impl Default for HttpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpEngine {
    /// Creates an engine with default timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates an engine with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(concat!("seriesdl/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }
}

#[async_trait]
impl Engine for HttpEngine {
    #[instrument(skip(self, job), fields(url = %job.url))]
    async fn submit(&self, job: &DownloadJob, auto_confirm: bool) -> Result<(), EngineError> {
        debug!("starting transfer");

        Url::parse(&job.url).map_err(|_| EngineError::invalid_url(&job.url))?;

        tokio::fs::create_dir_all(&job.destination_dir)
            .await
            .map_err(|e| EngineError::io(&job.destination_dir, e))?;

        let output_path = job.output_path();
        if !auto_confirm
            && tokio::fs::try_exists(&output_path).await.unwrap_or(false)
        {
            return Err(EngineError::destination_exists(output_path));
        }

        let response = self
            .client
            .get(&job.url)
            .header(REFERER, &job.referrer)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::timeout(&job.url)
                } else {
                    EngineError::network(&job.url, e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::http_status(&job.url, status.as_u16()));
        }

        let mut file = File::create(&output_path)
            .await
            .map_err(|e| EngineError::io(&output_path, e))?;

        // Stream response body to file, with cleanup on error
        let stream_result = stream_to_file(&mut file, response, &job.url, &output_path).await;
        if stream_result.is_err() {
            debug!(path = %output_path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&output_path).await;
        }
        let bytes_written = stream_result?;

        info!(
            path = %output_path.display(),
            bytes = bytes_written,
            "transfer complete"
        );
        Ok(())
    }
}

/// Streams response body to file, returning bytes written.
///
/// This is extracted to enable cleanup on error in the caller.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, EngineError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| EngineError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| EngineError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed to disk
    writer
        .flush()
        .await
        .map_err(|e| EngineError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
