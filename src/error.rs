//! Error types for ptop.
//!
//! One error enum covers collection and terminal failures. Per-process read
//! failures never surface here: the collector drops the affected process and
//! moves on. Only batch-level failures (the provider cannot enumerate
//! processes at all) and terminal errors are reported.

use std::io;
use thiserror::Error;

/// Error type for sampling and terminal operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A collector is not available on this system.
    #[error("collector '{0}' is not available on this system")]
    CollectorUnavailable(&'static str),

    /// Failed to collect a batch of samples.
    #[error("failed to collect samples from '{collector}': {message}")]
    CollectionFailed {
        /// The collector that failed.
        collector: &'static str,
        /// Error message describing the failure.
        message: String,
    },

    /// A single process disappeared or was unreadable mid-scan.
    #[error("process {0} not readable")]
    ProcessUnreadable(u32),

    /// Terminal initialization or rendering error.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// Result type alias for ptop operations.
pub type Result<T> = std::result::Result<T, Error>;
