//! Metric collectors.
//!
//! The dashboard loop consumes process batches through the [`Sampler`]
//! trait; the `/proc`-backed [`ProcessCollector`] is the production
//! implementation, and tests substitute scripted ones.

mod process;
mod system;

pub use process::{ProcessCollector, ProcessSample};
pub use system::SystemCollector;

use crate::error::Result;

/// Source of per-process sample batches.
pub trait Sampler {
    /// Collector id used in logs and errors.
    fn id(&self) -> &'static str;

    /// Collects a fresh batch of samples, one per readable process.
    ///
    /// An `Err` means the batch as a whole could not be collected; callers
    /// skip that tick and keep the previous frame. Individual unreadable
    /// processes are omitted from the batch, never reported as errors.
    fn sample(&mut self) -> Result<Vec<ProcessSample>>;

    /// Returns true if this collector can run on the current system.
    fn is_available(&self) -> bool;
}
