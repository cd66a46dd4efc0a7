//! Per-process I/O rate derivation.
//!
//! The OS reports cumulative lifetime counters; the dashboard wants
//! throughput. Rates are the delta between the current tick's counters and
//! the previous tick's counters for the same pid. Ticks are 1 second apart,
//! so the delta is already bytes per second.

use std::collections::HashMap;

use crate::collectors::ProcessSample;

/// A process sample enriched with derived I/O rates.
#[derive(Debug, Clone)]
pub struct RateSample {
    /// The raw sample for this tick.
    pub sample: ProcessSample,
    /// Bytes read per sampling interval.
    pub read_rate: f64,
    /// Bytes written per sampling interval.
    pub write_rate: f64,
}

/// Derives per-process rates for `current` against the previous tick.
///
/// Order-preserving with `current`. A pid with no entry in `previous` (new
/// process, or first tick with an empty map) gets rate 0 - a process's rate
/// is never its lifetime total. Counter resets (pid reuse reporting a lower
/// cumulative value) clamp to 0 via `saturating_sub`.
pub fn derive(
    current: &[ProcessSample],
    previous: &HashMap<u32, ProcessSample>,
) -> Vec<RateSample> {
    current
        .iter()
        .map(|s| {
            let (read_rate, write_rate) = match previous.get(&s.pid) {
                Some(prev) => (
                    s.read_bytes.saturating_sub(prev.read_bytes) as f64,
                    s.write_bytes.saturating_sub(prev.write_bytes) as f64,
                ),
                None => (0.0, 0.0),
            };

            RateSample { sample: s.clone(), read_rate, write_rate }
        })
        .collect()
}

/// Rebuilds the previous-batch cache from a freshly collected batch.
///
/// The cache is replaced wholesale every tick; entries for exited processes
/// simply fall out because they are absent from the new batch.
pub fn cache_batch(batch: Vec<ProcessSample>) -> HashMap<u32, ProcessSample> {
    batch.into_iter().map(|s| (s.pid, s)).collect()
}
