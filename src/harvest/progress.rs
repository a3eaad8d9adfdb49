//! Progress tracking for the extraction pipeline
//!
//! Progress is an accumulator value: each batch step takes the current
//! `ProgressState` and returns the advanced one. Snapshots are recomputed
//! from the counters on demand and never kept as running state.

use std::fmt;
use std::time::{Duration, Instant};

/// Cumulative counters of one extraction run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    started: Instant,
    total: usize,
    processed: usize,
    accepted: usize,
}

impl ProgressState {
    /// Starts tracking a run over `total` URLs
    pub fn new(total: usize, started: Instant) -> Self {
        Self {
            started,
            total,
            processed: 0,
            accepted: 0,
        }
    }

    /// Returns the state after a batch of `submitted` URLs produced `accepted` records
    #[must_use]
    pub fn advance(self, submitted: usize, accepted: usize) -> Self {
        Self {
            processed: self.processed + submitted,
            accepted: self.accepted + accepted,
            ..self
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// URLs submitted so far, whether or not they produced a record
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Records persisted so far
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Snapshot of the run as seen at `now`
    pub fn snapshot(&self, now: Instant) -> ProgressSnapshot {
        ProgressSnapshot::compute(
            self.processed,
            self.total,
            self.accepted,
            now.saturating_duration_since(self.started),
        )
    }
}

/// Derived view of a run's progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub processed: usize,
    pub total: usize,
    pub accepted: usize,
    pub elapsed: Duration,
    /// Items per second; 0 before any time has elapsed
    pub throughput: f64,
    /// Remaining time at the observed throughput; `None` while unknown
    pub eta: Option<Duration>,
}

impl ProgressSnapshot {
    /// Computes throughput and ETA from raw counters
    ///
    /// `throughput = processed / elapsed` and
    /// `eta = (total - processed) / throughput`.
    pub fn compute(processed: usize, total: usize, accepted: usize, elapsed: Duration) -> Self {
        let seconds = elapsed.as_secs_f64();
        let throughput = if seconds > 0.0 {
            processed as f64 / seconds
        } else {
            0.0
        };

        let remaining = total.saturating_sub(processed);
        let eta = if remaining == 0 {
            Some(Duration::ZERO)
        } else if throughput > 0.0 {
            Some(Duration::from_secs_f64(remaining as f64 / throughput))
        } else {
            None
        };

        Self {
            processed,
            total,
            accepted,
            elapsed,
            throughput,
            eta,
        }
    }

    /// Share of the URL set processed, in percent
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.processed as f64 / self.total as f64) * 100.0
        }
    }

    /// URLs that did not produce a record
    pub fn skipped(&self) -> usize {
        self.processed.saturating_sub(self.accepted)
    }
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}/{}] {:.1}% - {:.2} req/s - {} accepted, {} skipped - elapsed {:.1} min",
            self.processed,
            self.total,
            self.percent(),
            self.throughput,
            self.accepted,
            self.skipped(),
            self.elapsed.as_secs_f64() / 60.0,
        )?;

        match self.eta {
            Some(eta) => write!(f, " - ETA {:.1} min", eta.as_secs_f64() / 60.0),
            None => write!(f, " - ETA unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates() {
        let start = Instant::now();
        let state = ProgressState::new(10, start).advance(4, 3).advance(4, 4);

        assert_eq!(state.processed(), 8);
        assert_eq!(state.accepted(), 7);
        assert_eq!(state.total(), 10);
    }

    #[test]
    fn test_compute_throughput_and_eta() {
        let snapshot = ProgressSnapshot::compute(50, 200, 45, Duration::from_secs(25));

        assert!((snapshot.throughput - 2.0).abs() < 1e-9);
        assert_eq!(snapshot.eta, Some(Duration::from_secs(75)));
        assert!((snapshot.percent() - 25.0).abs() < 1e-9);
        assert_eq!(snapshot.skipped(), 5);
    }

    #[test]
    fn test_zero_elapsed_has_unknown_eta() {
        let snapshot = ProgressSnapshot::compute(0, 100, 0, Duration::ZERO);
        assert_eq!(snapshot.throughput, 0.0);
        assert_eq!(snapshot.eta, None);
    }

    #[test]
    fn test_finished_run_has_zero_eta() {
        let snapshot = ProgressSnapshot::compute(8, 8, 7, Duration::from_secs(4));
        assert_eq!(snapshot.eta, Some(Duration::ZERO));
        assert!((snapshot.percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_run() {
        let snapshot = ProgressSnapshot::compute(0, 0, 0, Duration::ZERO);
        assert_eq!(snapshot.eta, Some(Duration::ZERO));
        assert!((snapshot.percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_from_state() {
        let start = Instant::now();
        let state = ProgressState::new(4, start).advance(2, 1);
        let snapshot = state.snapshot(start + Duration::from_secs(2));

        assert_eq!(snapshot.processed, 2);
        assert_eq!(snapshot.accepted, 1);
        assert_eq!(snapshot.elapsed, Duration::from_secs(2));
        assert_eq!(snapshot.eta, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_display_line() {
        let snapshot = ProgressSnapshot::compute(50, 200, 45, Duration::from_secs(30));
        let line = snapshot.to_string();

        assert!(line.starts_with("[50/200] 25.0%"));
        assert!(line.contains("1.67 req/s"));
        assert!(line.contains("45 accepted, 5 skipped"));
        assert!(line.contains("ETA 1.5 min"));
    }
}
