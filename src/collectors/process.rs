//! Process metrics collector.
//!
//! Parses `/proc/[pid]/*` on Linux: `stat` for the name and CPU time,
//! `statm` for resident memory, `io` for cumulative read/write counters,
//! and `fd/` symlinks for open file paths.
//!
//! A process that fails any required read (stat, io) is omitted from the
//! batch; optional fields (memory, open files) degrade to zero/empty. Only
//! an unreadable proc root fails the whole batch.

use std::collections::HashMap;
use std::path::Path;

use crate::collectors::Sampler;
use crate::debug::{self, Level};
use crate::error::{Error, Result};

/// Maximum open-file paths retained per process. The table shows three;
/// the cap keeps a process with thousands of fds from bloating the batch.
const OPEN_FILES_CAP: usize = 64;

/// Raw metrics for a single process at one sampling tick.
///
/// Produced fresh every tick and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct ProcessSample {
    /// Process ID.
    pub pid: u32,
    /// Process name from `/proc/[pid]/stat`.
    pub name: String,
    /// Cumulative bytes read (lifetime counter).
    pub read_bytes: u64,
    /// Cumulative bytes written (lifetime counter).
    pub write_bytes: u64,
    /// CPU usage percentage since the previous scan.
    pub cpu_percent: f64,
    /// Resident memory as a percentage of total memory.
    pub mem_percent: f64,
    /// Open file paths (filtered to real paths, capped).
    pub open_files: Vec<String>,
}

/// Collector reading per-process samples from `/proc`.
#[derive(Debug, Default)]
pub struct ProcessCollector {
    /// Previous per-pid CPU times for delta calculation.
    prev_cpu_times: HashMap<u32, u64>,
    /// Previous total CPU time.
    prev_total_cpu: u64,
    /// Total system memory, read once from the proc root.
    total_memory: u64,
}

impl ProcessCollector {
    /// Creates a new process collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans an explicit proc root.
    ///
    /// Production sampling goes through [`Sampler::sample`], which points
    /// this at `/proc`; tests point it at a synthetic tree.
    pub fn sample_at(&mut self, root: &Path) -> Result<Vec<ProcessSample>> {
        let proc_dir = std::fs::read_dir(root).map_err(|e| Error::CollectionFailed {
            collector: "process",
            message: format!("failed to read {}: {}", root.display(), e),
        })?;

        if self.total_memory == 0 {
            self.total_memory = std::fs::read_to_string(root.join("meminfo"))
                .ok()
                .and_then(|c| parse_mem_total(&c))
                .unwrap_or(0);
        }

        let curr_total_cpu = std::fs::read_to_string(root.join("stat"))
            .ok()
            .and_then(|c| parse_total_cpu(&c))
            .unwrap_or(0);

        let mut batch = Vec::new();
        let mut new_cpu_times = HashMap::new();

        for entry in proc_dir.flatten() {
            let name = entry.file_name();
            let Ok(pid) = name.to_string_lossy().parse::<u32>() else {
                continue;
            };

            match self.read_sample(root, pid, curr_total_cpu) {
                Ok((sample, cpu_time)) => {
                    new_cpu_times.insert(pid, cpu_time);
                    batch.push(sample);
                }
                Err(_) => {
                    // Exited mid-scan or unreadable counters: drop it.
                    debug::log(Level::Debug, "process", &format!("pid {pid} omitted"));
                }
            }
        }

        // pid order keeps tie-breaking in the ranker deterministic.
        batch.sort_by_key(|s| s.pid);

        self.prev_cpu_times = new_cpu_times;
        self.prev_total_cpu = curr_total_cpu;

        Ok(batch)
    }

    /// Reads one process. Returns the sample plus its raw CPU time for the
    /// next scan's delta.
    fn read_sample(
        &self,
        root: &Path,
        pid: u32,
        curr_total_cpu: u64,
    ) -> Result<(ProcessSample, u64)> {
        let pid_dir = root.join(pid.to_string());

        let stat = std::fs::read_to_string(pid_dir.join("stat"))
            .map_err(|_| Error::ProcessUnreadable(pid))?;
        let (name, cpu_time) = parse_stat(&stat).ok_or(Error::ProcessUnreadable(pid))?;

        let io = std::fs::read_to_string(pid_dir.join("io"))
            .map_err(|_| Error::ProcessUnreadable(pid))?;
        let (read_bytes, write_bytes) = parse_io(&io).ok_or(Error::ProcessUnreadable(pid))?;

        let cpu_percent = if let Some(&prev) = self.prev_cpu_times.get(&pid) {
            let cpu_delta = cpu_time.saturating_sub(prev);
            let total_delta = curr_total_cpu.saturating_sub(self.prev_total_cpu);
            if total_delta > 0 {
                (cpu_delta as f64 / total_delta as f64) * 100.0
            } else {
                0.0
            }
        } else {
            0.0
        };

        let mem_bytes = std::fs::read_to_string(pid_dir.join("statm"))
            .ok()
            .and_then(|s| s.split_whitespace().nth(1).and_then(|f| f.parse::<u64>().ok()))
            .map(|pages| pages * 4096)
            .unwrap_or(0);
        let mem_percent = if self.total_memory > 0 {
            (mem_bytes as f64 / self.total_memory as f64) * 100.0
        } else {
            0.0
        };

        let open_files = read_open_files(&pid_dir);

        let sample = ProcessSample {
            pid,
            name,
            read_bytes,
            write_bytes,
            cpu_percent,
            mem_percent,
            open_files,
        };

        Ok((sample, cpu_time))
    }
}

/// Reads open file paths from `fd/` symlinks.
///
/// Sockets, pipes, and anonymous inodes resolve to pseudo-targets like
/// `socket:[12345]`; only real paths are kept. Any failure (fd dir gone,
/// permission denied) yields an empty list, never an error.
fn read_open_files(pid_dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(pid_dir.join("fd")) else {
        return Vec::new();
    };

    let mut files = Vec::new();
    for entry in entries.flatten() {
        if files.len() >= OPEN_FILES_CAP {
            break;
        }
        if let Ok(target) = std::fs::read_link(entry.path()) {
            let path = target.to_string_lossy();
            if path.starts_with('/') {
                files.push(path.into_owned());
            }
        }
    }
    files
}

/// Parses `/proc/[pid]/stat`: the name between parentheses, then
/// whitespace-separated fields where utime and stime are fields 11 and 12
/// counted after the name.
fn parse_stat(stat: &str) -> Option<(String, u64)> {
    let name_start = stat.find('(')?;
    let name_end = stat.rfind(')')?;
    let name = stat.get(name_start + 1..name_end)?.to_string();

    let after_name = stat.get(name_end + 2..)?;
    let fields: Vec<&str> = after_name.split_whitespace().collect();

    let utime: u64 = fields.get(11)?.parse().ok()?;
    let stime: u64 = fields.get(12)?.parse().ok()?;

    Some((name, utime + stime))
}

/// Parses `/proc/[pid]/io` for the `read_bytes`/`write_bytes` lines.
fn parse_io(content: &str) -> Option<(u64, u64)> {
    let mut read_bytes = None;
    let mut write_bytes = None;

    for line in content.lines() {
        if let Some(v) = line.strip_prefix("read_bytes:") {
            read_bytes = v.trim().parse().ok();
        } else if let Some(v) = line.strip_prefix("write_bytes:") {
            write_bytes = v.trim().parse().ok();
        }
    }

    Some((read_bytes?, write_bytes?))
}

/// Sums the aggregate `cpu ` line of `/proc/stat`.
fn parse_total_cpu(content: &str) -> Option<u64> {
    content
        .lines()
        .find(|l| l.starts_with("cpu "))
        .map(|l| l.split_whitespace().skip(1).filter_map(|s| s.parse::<u64>().ok()).sum())
}

/// Reads `MemTotal` from `/proc/meminfo`, in bytes.
fn parse_mem_total(content: &str) -> Option<u64> {
    content
        .lines()
        .find(|l| l.starts_with("MemTotal:"))
        .and_then(|l| l.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u64>().ok())
        .map(|kb| kb * 1024)
}

impl Sampler for ProcessCollector {
    fn id(&self) -> &'static str {
        "process"
    }

    fn sample(&mut self) -> Result<Vec<ProcessSample>> {
        #[cfg(target_os = "linux")]
        {
            self.sample_at(Path::new("/proc"))
        }
        #[cfg(not(target_os = "linux"))]
        {
            Err(Error::CollectorUnavailable("process"))
        }
    }

    fn is_available(&self) -> bool {
        #[cfg(target_os = "linux")]
        {
            Path::new("/proc").exists()
        }
        #[cfg(not(target_os = "linux"))]
        {
            false
        }
    }
}
