//! Ranking of derived samples for display.

use std::cmp::Ordering;

use crate::rates::RateSample;
use crate::state::SortKey;

/// Sorts `samples` descending by `key` and truncates to `limit`.
///
/// The sort is stable: rows with equal keys keep the order the provider
/// reported, so two processes at the same CPU% do not flicker position
/// between ticks. Truncation happens after sorting - truncating first would
/// drop true top-N entries.
pub fn rank(mut samples: Vec<RateSample>, key: SortKey, limit: usize) -> Vec<RateSample> {
    samples.sort_by(|a, b| {
        let (a_key, b_key) = match key {
            SortKey::Cpu => (a.sample.cpu_percent, b.sample.cpu_percent),
            SortKey::ReadRate => (a.read_rate, b.read_rate),
            SortKey::WriteRate => (a.write_rate, b.write_rate),
        };
        b_key.partial_cmp(&a_key).unwrap_or(Ordering::Equal)
    });

    samples.truncate(limit);
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::ProcessSample;

    fn rate_sample(pid: u32, cpu: f64, read: f64, write: f64) -> RateSample {
        RateSample {
            sample: ProcessSample { pid, cpu_percent: cpu, ..ProcessSample::default() },
            read_rate: read,
            write_rate: write,
        }
    }

    #[test]
    fn test_rank_descending_by_cpu() {
        let samples = vec![
            rate_sample(1, 10.0, 0.0, 0.0),
            rate_sample(2, 90.0, 0.0, 0.0),
            rate_sample(3, 50.0, 0.0, 0.0),
        ];
        let ranked = rank(samples, SortKey::Cpu, 10);
        let pids: Vec<u32> = ranked.iter().map(|r| r.sample.pid).collect();
        assert_eq!(pids, vec![2, 3, 1]);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        // A and B tie at 50%; A must stay ahead of B.
        let samples = vec![
            rate_sample(100, 50.0, 0.0, 0.0), // A
            rate_sample(200, 50.0, 0.0, 0.0), // B
            rate_sample(300, 30.0, 0.0, 0.0), // C
        ];
        let ranked = rank(samples, SortKey::Cpu, 10);
        let pids: Vec<u32> = ranked.iter().map(|r| r.sample.pid).collect();
        assert_eq!(pids, vec![100, 200, 300]);
    }

    #[test]
    fn test_truncation_happens_after_sort() {
        // 25 samples with ascending read rates; the top 20 must be the 20
        // largest, not an arbitrary prefix of the input.
        let samples: Vec<RateSample> =
            (0..25).map(|i| rate_sample(i, 0.0, f64::from(i), 0.0)).collect();
        let ranked = rank(samples, SortKey::ReadRate, 20);

        assert_eq!(ranked.len(), 20);
        assert_eq!(ranked[0].read_rate, 24.0);
        assert_eq!(ranked[19].read_rate, 5.0);
    }

    #[test]
    fn test_limit_larger_than_input() {
        let samples = vec![rate_sample(1, 1.0, 0.0, 0.0)];
        assert_eq!(rank(samples, SortKey::Cpu, 20).len(), 1);
    }

    #[test]
    fn test_limit_zero_yields_empty() {
        let samples = vec![rate_sample(1, 1.0, 0.0, 0.0)];
        assert!(rank(samples, SortKey::Cpu, 0).is_empty());
    }

    #[test]
    fn test_rank_by_write_rate() {
        let samples = vec![
            rate_sample(1, 99.0, 0.0, 10.0),
            rate_sample(2, 1.0, 0.0, 500.0),
        ];
        let ranked = rank(samples, SortKey::WriteRate, 10);
        assert_eq!(ranked[0].sample.pid, 2);
    }
}
