//! ptop library - per-process I/O terminal dashboard
//!
//! This module exposes the core components for testing and embedding.
#![cfg_attr(test, allow(clippy::unwrap_used))]
//!
//! ## Architecture
//!
//! - **app**: Main application state and the tick/key/resize dispatch logic
//! - **collectors**: `/proc`-backed process and system metric collection
//! - **rates**: Cross-tick I/O throughput derivation from cumulative counters
//! - **rank**: Stable sort and truncation of the display rows
//! - **state**: UI state types
//! - **theme**: Color ramps and byte formatting
//! - **ui**: Rendering

pub mod app;
pub mod collectors;
pub mod debug;
pub mod error;
pub mod rank;
pub mod rates;
pub mod state;
pub mod theme;
pub mod ui;

// Re-export key types for convenience
pub use app::{App, DISPLAY_BUDGET, TICK_INTERVAL};
pub use collectors::{ProcessCollector, ProcessSample, Sampler, SystemCollector};
pub use error::{Error, Result};
pub use rates::RateSample;
pub use state::SortKey;
