//! Host-wide CPU and memory gauges for the dashboard header.
//!
//! Header values are decoration around the process table: any read failure
//! degrades to 0.0 and never aborts a tick.

use std::path::Path;

/// Collector for aggregate CPU and memory utilization.
#[derive(Debug, Default)]
pub struct SystemCollector {
    /// Previous total jiffies from the aggregate cpu line.
    prev_total: u64,
    /// Previous idle jiffies (idle + iowait).
    prev_idle: u64,
}

impl SystemCollector {
    /// Creates a new system collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(cpu_percent, mem_percent)` for the host.
    ///
    /// The first call has no baseline and reports CPU as 0.0.
    pub fn sample(&mut self) -> (f64, f64) {
        #[cfg(target_os = "linux")]
        {
            let root = Path::new("/proc");
            (self.cpu_percent(root), mem_percent(root))
        }
        #[cfg(not(target_os = "linux"))]
        {
            (0.0, 0.0)
        }
    }

    fn cpu_percent(&mut self, root: &Path) -> f64 {
        let Some((total, idle)) = std::fs::read_to_string(root.join("stat"))
            .ok()
            .and_then(|c| parse_cpu_line(&c))
        else {
            return 0.0;
        };

        let total_delta = total.saturating_sub(self.prev_total);
        let idle_delta = idle.saturating_sub(self.prev_idle);
        let first = self.prev_total == 0;

        self.prev_total = total;
        self.prev_idle = idle;

        if first || total_delta == 0 {
            0.0
        } else {
            (100.0 * (1.0 - idle_delta as f64 / total_delta as f64)).clamp(0.0, 100.0)
        }
    }
}

/// Parses the aggregate `cpu ` line into `(total, idle)` jiffies.
/// Idle counts the idle and iowait fields.
fn parse_cpu_line(content: &str) -> Option<(u64, u64)> {
    let line = content.lines().find(|l| l.starts_with("cpu "))?;
    let fields: Vec<u64> =
        line.split_whitespace().skip(1).filter_map(|s| s.parse().ok()).collect();
    if fields.len() < 5 {
        return None;
    }

    let total = fields.iter().sum();
    let idle = fields[3] + fields[4];
    Some((total, idle))
}

fn mem_percent(root: &Path) -> f64 {
    std::fs::read_to_string(root.join("meminfo"))
        .ok()
        .and_then(|c| parse_mem_percent(&c))
        .unwrap_or(0.0)
}

/// Used-memory percentage from `MemTotal` and `MemAvailable`.
fn parse_mem_percent(content: &str) -> Option<f64> {
    let field = |name: &str| {
        content
            .lines()
            .find(|l| l.starts_with(name))
            .and_then(|l| l.split_whitespace().nth(1))
            .and_then(|s| s.parse::<f64>().ok())
    };

    let total = field("MemTotal:")?;
    let available = field("MemAvailable:")?;
    if total <= 0.0 {
        return None;
    }

    Some((100.0 * (1.0 - available / total)).clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cpu_line() {
        let stat = "cpu  100 0 100 700 100 0 0 0 0 0\ncpu0 1 1 1 1 1 1 1 1 1 1\n";
        let (total, idle) = parse_cpu_line(stat).unwrap();
        assert_eq!(total, 1000);
        assert_eq!(idle, 800);
    }

    #[test]
    fn test_parse_cpu_line_too_short() {
        assert!(parse_cpu_line("cpu 1 2 3\n").is_none());
        assert!(parse_cpu_line("intr 12345\n").is_none());
    }

    #[test]
    fn test_parse_mem_percent() {
        let meminfo = "MemTotal:  1000 kB\nMemFree:  100 kB\nMemAvailable:  250 kB\n";
        let pct = parse_mem_percent(meminfo).unwrap();
        assert!((pct - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_mem_percent_missing_fields() {
        assert!(parse_mem_percent("MemTotal: 1000 kB\n").is_none());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_sample_degrades_not_panics() {
        let mut sys = SystemCollector::new();
        let (cpu, mem) = sys.sample();
        // First call has no CPU baseline.
        assert_eq!(cpu, 0.0);
        assert!((0.0..=100.0).contains(&mem));

        let (cpu, _) = sys.sample();
        assert!((0.0..=100.0).contains(&cpu));
    }
}
