// State module - per-run reporter bookkeeping
// Deferred failures and duration samples, drained once per summary flush

use crate::event::SpecResult;

/// Rendered category of a finished spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecStatus {
    Success,
    Failure,
    Skipped,
}

impl SpecStatus {
    pub fn of(result: &SpecResult) -> Self {
        if result.skipped {
            Self::Skipped
        } else if result.success {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

/// Accumulated run statistics.
///
/// `failures` holds results waiting for the deferred report; `durations`
/// holds one sample per rendered spec. Both are cleared by their drain
/// call so a watch-mode re-run starts clean.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    failures: Vec<SpecResult>,
    durations: Vec<u64>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one spec duration sample.
    pub fn record_duration(&mut self, time_ms: u64) {
        self.durations.push(time_ms);
    }

    /// Buffer a failing result for the deferred report.
    pub fn record_failure(&mut self, result: SpecResult) {
        self.failures.push(result);
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Take the buffered failures, leaving the buffer empty.
    pub fn drain_failures(&mut self) -> Vec<SpecResult> {
        std::mem::take(&mut self.failures)
    }

    /// Arithmetic mean of the recorded durations, clearing them.
    /// `None` when no sample was recorded since the last drain.
    pub fn drain_average(&mut self) -> Option<f64> {
        if self.durations.is_empty() {
            return None;
        }
        let sum: u64 = self.durations.iter().sum();
        let mean = sum as f64 / self.durations.len() as f64;
        self.durations.clear();
        Some(mean)
    }

    /// Drop everything without reporting.
    pub fn reset(&mut self) {
        self.failures.clear();
        self.durations.clear();
    }
}
