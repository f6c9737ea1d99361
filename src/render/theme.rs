// Style table for the spec reporter, built once from the merged options
// and never mutated afterwards.

use console::Style;

use crate::config::ReporterOptions;
use crate::state::SpecStatus;

/// Classification of a duration against the fast/slow thresholds.
///
/// Boundary rule: a time is fast only strictly below `fast` and slow only
/// strictly above `slow`; both exact thresholds land in `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    Fast,
    Medium,
    Slow,
}

impl TimeBucket {
    pub fn classify(time_ms: f64, fast_ms: u64, slow_ms: u64) -> Self {
        if time_ms < fast_ms as f64 {
            Self::Fast
        } else if time_ms > slow_ms as f64 {
            Self::Slow
        } else {
            Self::Medium
        }
    }
}

/// Immutable colors and prefixes resolved from the reporter options.
#[derive(Debug, Clone)]
pub struct Theme {
    pub success_prefix: String,
    pub failure_prefix: String,
    pub skipped_prefix: String,

    success: Style,
    failure: Style,
    skipped: Style,

    fast: Style,
    medium: Style,
    slow: Style,

    /// Browser registration and the text of the finished-counts line.
    pub banner: Style,
    /// The "N TEST(S) FAILED:" header of the deferred report.
    pub late_header: Style,
    pub backtrace: Style,
    /// Browser console message body.
    pub log_message: Style,

    pub success_count: Style,
    pub skipped_count: Style,
    pub failed_count: Style,
    pub total_count: Style,
    pub total_time: Style,

    fast_ms: u64,
    slow_ms: u64,
}

impl Theme {
    pub fn new(options: &ReporterOptions) -> Self {
        let paint = |style: Style| {
            if options.colors {
                style.force_styling(true)
            } else {
                Style::new()
            }
        };

        Self {
            success_prefix: options.prefixes.success.clone(),
            failure_prefix: options.prefixes.failure.clone(),
            skipped_prefix: options.prefixes.skipped.clone(),

            success: paint(Style::new().green()),
            failure: paint(Style::new().red()),
            skipped: paint(Style::new().dim()),

            fast: paint(Style::new().green()),
            medium: paint(Style::new().yellow()),
            slow: paint(Style::new().red()),

            banner: paint(Style::new().yellow()),
            late_header: paint(Style::new().red()),
            backtrace: paint(Style::new().red()),
            log_message: paint(Style::new().cyan()),

            success_count: paint(Style::new().green()),
            skipped_count: paint(Style::new().dim()),
            failed_count: paint(Style::new().red()),
            total_count: paint(Style::new().magenta()),
            total_time: paint(Style::new().cyan()),

            fast_ms: options.fast_ms,
            slow_ms: options.slow_ms,
        }
    }

    pub fn prefix(&self, status: SpecStatus) -> &str {
        match status {
            SpecStatus::Success => &self.success_prefix,
            SpecStatus::Failure => &self.failure_prefix,
            SpecStatus::Skipped => &self.skipped_prefix,
        }
    }

    pub fn status_style(&self, status: SpecStatus) -> &Style {
        match status {
            SpecStatus::Success => &self.success,
            SpecStatus::Failure => &self.failure,
            SpecStatus::Skipped => &self.skipped,
        }
    }

    pub fn time_style(&self, time_ms: f64) -> &Style {
        match TimeBucket::classify(time_ms, self.fast_ms, self.slow_ms) {
            TimeBucket::Fast => &self.fast,
            TimeBucket::Medium => &self.medium,
            TimeBucket::Slow => &self.slow,
        }
    }
}
