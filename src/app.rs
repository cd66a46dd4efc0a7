//! Application state and logic for ptop.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyModifiers};

use crate::collectors::{ProcessSample, Sampler, SystemCollector};
use crate::debug::{self, Level};
use crate::rank;
use crate::rates::{self, RateSample};
use crate::state::SortKey;

/// Maximum number of rows the process table shows.
pub const DISPLAY_BUDGET: usize = 20;

/// Fixed spacing between sampling ticks. Rate derivation assumes this
/// exact interval: deltas are reported as per-second values without
/// rescaling.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Main application state.
///
/// Owns everything the event loop mutates: the previous-batch cache, the
/// current sort key, and the most recently ranked rows. All mutation
/// happens on the single dispatch thread, one event at a time.
pub struct App<P: Sampler> {
    provider: P,
    system: SystemCollector,

    /// Previous tick's batch keyed by pid, replaced wholesale each
    /// successful tick.
    prev_batch: HashMap<u32, ProcessSample>,

    /// Ranked rows from the last successful tick; resize and failed ticks
    /// redraw these unchanged.
    pub rows: Vec<RateSample>,

    /// Current sort key, changed only by keypress.
    pub sort_key: SortKey,

    /// Selected row index into `rows`.
    pub selected: usize,

    /// Open-files popup for the selected row.
    pub show_files: bool,

    /// Host-wide gauges for the header.
    pub cpu_percent: f64,
    pub mem_percent: f64,

    /// When the last refresh ran; the loop schedules the next tick from it.
    pub last_collect: Instant,
}

impl<P: Sampler> App<P> {
    /// Creates the application and takes the first sample synchronously,
    /// so the first frame renders before the event loop starts. The first
    /// batch has no baseline: every rate shows 0.
    pub fn new(provider: P) -> Self {
        let mut app = Self {
            provider,
            system: SystemCollector::new(),
            prev_batch: HashMap::new(),
            rows: Vec::new(),
            sort_key: SortKey::default(),
            selected: 0,
            show_files: false,
            cpu_percent: 0.0,
            mem_percent: 0.0,
            last_collect: Instant::now(),
        };
        app.refresh();
        app
    }

    /// Samples, derives rates against the previous batch, ranks, and caches
    /// the batch for the next tick.
    ///
    /// A failed fetch skips all of that: the previous rows stay on screen,
    /// the cache stays intact, and the next tick is the retry.
    pub fn refresh(&mut self) {
        let (cpu, mem) = self.system.sample();
        self.cpu_percent = cpu;
        self.mem_percent = mem;

        match self.provider.sample() {
            Ok(batch) => self.apply_batch(batch),
            Err(e) => {
                debug::log(
                    Level::Warn,
                    self.provider.id(),
                    &format!("tick skipped, keeping last frame: {e}"),
                );
            }
        }

        self.last_collect = Instant::now();
    }

    fn apply_batch(&mut self, batch: Vec<ProcessSample>) {
        let derived = rates::derive(&batch, &self.prev_batch);
        self.rows = rank::rank(derived, self.sort_key, DISPLAY_BUDGET);
        self.prev_batch = rates::cache_batch(batch);
        self.clamp_selection();
    }

    /// Handle keyboard input. Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        // Ctrl+C always quits, even though plain 'c' selects a sort key.
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.show_files {
                    self.show_files = false;
                } else {
                    return true;
                }
            }

            // Sort keys re-sample immediately so the table reorders on the
            // keypress, not at the next timer tick.
            KeyCode::Char('c') => self.set_sort_key(SortKey::Cpu),
            KeyCode::Char('r') => self.set_sort_key(SortKey::ReadRate),
            KeyCode::Char('w') => self.set_sort_key(SortKey::WriteRate),

            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.rows.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => self.show_files = !self.show_files,

            _ => {}
        }

        false
    }

    fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.refresh();
    }

    fn clamp_selection(&mut self) {
        if self.rows.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.rows.len() {
            self.selected = self.rows.len() - 1;
        }
    }

    /// The currently selected row, if any.
    pub fn selected_row(&self) -> Option<&RateSample> {
        self.rows.get(self.selected)
    }
}
