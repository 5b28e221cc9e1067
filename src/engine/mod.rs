//! Download engine seam and the default HTTP implementation.
//!
//! The dispatch loop treats the engine as an external collaborator: jobs
//! are handed over one at a time and the loop never inspects what became
//! of them. The [`Engine`] trait is the injection point; tests substitute
//! a recording fake, production wires in [`HttpEngine`].

mod error;
mod http;

use async_trait::async_trait;

use crate::dispatch::DownloadJob;

pub use error::EngineError;
pub use http::HttpEngine;

/// Accepts download jobs for transfer.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Submits one job for transfer.
    ///
    /// `auto_confirm` grants the engine permission to overwrite an
    /// existing output file without asking; the dispatch loop always
    /// passes `false`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the transfer cannot be started or
    /// completed. Callers are free to ignore the error: a submission
    /// failure is the engine's concern, not the orchestrator's.
    async fn submit(&self, job: &DownloadJob, auto_confirm: bool) -> Result<(), EngineError>;
}
