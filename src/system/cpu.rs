use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, eyre};

use super::fields::settle;

/// Aggregate jiffy counters from the `cpu` line of `/proc/stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTicks {
    pub total: u64,
    pub idle: u64,
}

/// Parses the aggregate `cpu` line: user nice system idle iowait irq softirq
/// steal guest guest_nice. Kernels that report fewer than ten counters are
/// accepted as long as `idle` is present.
pub fn parse_cpu_ticks(content: &str) -> Result<CpuTicks> {
    let line = content
        .lines()
        .find(|line| line.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| eyre!("no aggregate cpu line"))?;

    let counters = line
        .split_whitespace()
        .skip(1)
        .take(10)
        .map(|field| field.parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .wrap_err("non-numeric cpu counter")?;

    if counters.len() < 4 {
        return Err(eyre!("expected at least 4 cpu counters, got {}", counters.len()));
    }

    let total = counters
        .iter()
        .try_fold(0u64, |sum, &value| sum.checked_add(value))
        .ok_or_else(|| eyre!("cpu counters overflow"))?;

    Ok(CpuTicks {
        total,
        idle: counters[3],
    })
}

/// Turns successive tick samples into a utilization percentage.
///
/// Owns the previous sample; one tracker per refresh loop.
#[derive(Debug, Default)]
pub struct CpuUsageTracker {
    previous: Option<CpuTicks>,
}

impl CpuUsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `100 * (1 - Δidle / Δtotal)` clamped to `[0, 100]`.
    ///
    /// With no earlier sample, an unchanged total, or counters that went
    /// backwards, there is no interval to measure and the result is 0.
    pub fn sample(&mut self, current: CpuTicks) -> f64 {
        let usage = match self.previous {
            Some(prev) if current.total >= prev.total && current.idle >= prev.idle => {
                let total_delta = current.total - prev.total;
                let idle_delta = current.idle - prev.idle;
                if total_delta == 0 {
                    0.0
                } else {
                    (100.0 * (1.0 - idle_delta as f64 / total_delta as f64)).clamp(0.0, 100.0)
                }
            }
            _ => 0.0,
        };
        self.previous = Some(current);
        usage
    }

    pub fn read(&mut self, stat_path: &Path) -> Option<f64> {
        let ticks = settle("cpu_usage", read_cpu_ticks(stat_path))?;
        Some(self.sample(ticks))
    }
}

fn read_cpu_ticks(path: &Path) -> Result<CpuTicks> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    parse_cpu_ticks(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const STAT: &str = "cpu  4705 356 584 3699 23 23 0 0 0 0\n\
cpu0 1393280 32966 572056 13343292 6130 0 17875 0 23933 0\n\
intr 1462898\n";

    #[test]
    fn parses_aggregate_line_only() {
        let ticks = parse_cpu_ticks(STAT).unwrap();
        assert_eq!(ticks.idle, 3699);
        assert_eq!(ticks.total, 4705 + 356 + 584 + 3699 + 23 + 23);
    }

    #[test]
    fn short_cpu_line_is_accepted() {
        let ticks = parse_cpu_ticks("cpu 10 0 10 80\n").unwrap();
        assert_eq!(ticks, CpuTicks { total: 100, idle: 80 });
    }

    #[test]
    fn malformed_cpu_line_is_rejected() {
        assert!(parse_cpu_ticks("cpu 10 x 10 80\n").is_err());
        assert!(parse_cpu_ticks("cpu 10 10\n").is_err());
        assert!(parse_cpu_ticks("cpu0 1 2 3 4\n").is_err());
        assert!(parse_cpu_ticks("").is_err());
    }

    #[test]
    fn overflowing_counters_are_rejected() {
        assert!(parse_cpu_ticks("cpu 18446744073709551615 1 0 0\n").is_err());
        let max = u64::MAX.to_string();
        assert!(parse_cpu_ticks(&format!("cpu {max} 0 0 0\n")).is_ok());
    }

    #[test]
    fn first_sample_reports_zero() {
        let mut tracker = CpuUsageTracker::new();
        assert_eq!(tracker.sample(CpuTicks { total: 1000, idle: 100 }), 0.0);
    }

    #[test]
    fn delta_between_two_samples() {
        let mut tracker = CpuUsageTracker::new();
        tracker.sample(CpuTicks { total: 1000, idle: 800 });
        let usage = tracker.sample(CpuTicks { total: 1200, idle: 950 });
        assert!((usage - 25.0).abs() < 1e-9);
    }

    #[test]
    fn unchanged_counters_report_zero() {
        let mut tracker = CpuUsageTracker::new();
        let ticks = CpuTicks { total: 500, idle: 400 };
        tracker.sample(ticks);
        assert_eq!(tracker.sample(ticks), 0.0);
    }

    #[test]
    fn counter_regression_resets_baseline() {
        let mut tracker = CpuUsageTracker::new();
        tracker.sample(CpuTicks { total: 5000, idle: 4000 });
        assert_eq!(tracker.sample(CpuTicks { total: 100, idle: 50 }), 0.0);
        let usage = tracker.sample(CpuTicks { total: 200, idle: 100 });
        assert!((usage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn missing_stat_file_is_unavailable() {
        let mut tracker = CpuUsageTracker::new();
        assert!(tracker.read(Path::new("/nonexistent/proc/stat")).is_none());
    }

    proptest! {
        #[test]
        fn usage_matches_rounded_formula(
            total0 in 0u64..1_000_000,
            idle0 in 0u64..1_000_000,
            busy_delta in 0u64..100_000,
            idle_delta in 0u64..100_000,
        ) {
            prop_assume!(busy_delta + idle_delta > 0);
            let mut tracker = CpuUsageTracker::new();
            let idle0 = idle0.min(total0);
            tracker.sample(CpuTicks { total: total0, idle: idle0 });
            let usage = tracker.sample(CpuTicks {
                total: total0 + busy_delta + idle_delta,
                idle: idle0 + idle_delta,
            });

            let expected =
                (100.0 * (1.0 - idle_delta as f64 / (busy_delta + idle_delta) as f64)).round();
            prop_assert!((0.0..=100.0).contains(&usage));
            prop_assert_eq!(usage.round(), expected);
        }
    }
}
