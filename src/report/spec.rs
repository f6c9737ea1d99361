// Spec reporter - indented, suite-grouped console output

use std::io::Write;

use anyhow::Result;

use crate::config::ReporterOptions;
use crate::event::{BrowserInfo, LogLevel, RunTotals, SpecResult};
use crate::render::line;
use crate::render::path::{SuiteDiff, SuiteTracker};
use crate::render::theme::Theme;
use crate::state::{RunStats, SpecStatus};

/// Renders the event stream as nested, status-prefixed spec lines.
///
/// Owns the output sink exclusively; every printed line goes through it in
/// handler order. Stdout in the binary, an in-memory buffer in tests.
pub struct SpecReporter<W: Write> {
    options: ReporterOptions,
    theme: Theme,
    sink: W,
    tracker: SuiteTracker,
    stats: RunStats,
    browsers_seen: usize,
}

impl<W: Write> SpecReporter<W> {
    pub fn new(sink: W, options: ReporterOptions) -> Self {
        let theme = Theme::new(&options);
        Self {
            options,
            theme,
            sink,
            tracker: SuiteTracker::new(),
            stats: RunStats::new(),
            browsers_seen: 0,
        }
    }

    /// Consume the reporter and hand back its sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Failures currently waiting for the deferred report.
    pub fn pending_failures(&self) -> usize {
        self.stats.failure_count()
    }

    /// Drain and print the end-of-run summary.
    ///
    /// Buffered failures replay through a summary-local suite tracker with
    /// their backtraces inline, then the mean spec duration prints with the
    /// usual bucket styling. Both buffers clear, so a second flush with no
    /// intervening events prints nothing.
    pub fn flush(&mut self) -> Result<()> {
        if self.stats.has_failures() {
            let failures = self.stats.drain_failures();

            writeln!(self.sink)?;
            writeln!(self.sink, "{}", line::late_header(&self.theme, failures.len()))?;

            let mut replay = SuiteTracker::new();
            for result in &failures {
                let diff = replay.enter(&result.suite);
                self.write_diff(&diff)?;

                let mut text = line::spec_line(
                    &self.theme,
                    replay.leaf_depth(),
                    SpecStatus::Failure,
                    &result.description,
                    result.time,
                );
                text.push_str(&line::backtrace(
                    &self.theme,
                    &result.log,
                    self.options.max_log_lines,
                ));
                writeln!(self.sink, "{}", text)?;
            }
        }

        if let Some(mean) = self.stats.drain_average() {
            writeln!(
                self.sink,
                "{}{}",
                self.theme.banner.apply_to("AVERAGE SPEC TIME"),
                line::average_annotation(&self.theme, mean),
            )?;
        }

        Ok(())
    }

    fn write_diff(&mut self, diff: &SuiteDiff) -> Result<()> {
        if diff.separator {
            writeln!(self.sink)?;
        }
        for header in &diff.headers {
            writeln!(self.sink, "{}", line::suite_header(header))?;
        }
        Ok(())
    }

    fn spec_success(&mut self, result: &SpecResult) -> Result<()> {
        if self.options.suppress_success {
            return Ok(());
        }

        let diff = self.tracker.enter(&result.suite);
        self.write_diff(&diff)?;

        let text = line::spec_line(
            &self.theme,
            self.tracker.leaf_depth(),
            SpecStatus::Success,
            &result.description,
            result.time,
        );
        writeln!(self.sink, "{}", text)?;

        self.stats.record_duration(result.time);
        Ok(())
    }

    fn spec_skipped(&mut self, result: &SpecResult) -> Result<()> {
        if self.options.suppress_skipped {
            return Ok(());
        }

        let diff = self.tracker.enter(&result.suite);
        self.write_diff(&diff)?;

        let text = line::spec_line(
            &self.theme,
            self.tracker.leaf_depth(),
            SpecStatus::Skipped,
            &result.description,
            result.time,
        );
        writeln!(self.sink, "{}", text)?;

        self.stats.record_duration(result.time);
        Ok(())
    }

    fn spec_failure(&mut self, result: &SpecResult) -> Result<()> {
        if self.options.suppress_failed {
            return Ok(());
        }

        let diff = self.tracker.enter(&result.suite);
        self.write_diff(&diff)?;

        let mut text = line::spec_line(
            &self.theme,
            self.tracker.leaf_depth(),
            SpecStatus::Failure,
            &result.description,
            result.time,
        );
        if self.options.late_report {
            self.stats.record_failure(result.clone());
        } else {
            text.push_str(&line::backtrace(
                &self.theme,
                &result.log,
                self.options.max_log_lines,
            ));
        }
        writeln!(self.sink, "{}", text)?;

        self.stats.record_duration(result.time);
        Ok(())
    }
}

impl<W: Write> super::Reporter for SpecReporter<W> {
    fn on_browser_register(&mut self, browser: &BrowserInfo) -> Result<()> {
        self.browsers_seen += 1;

        let banner = format!("USING BROWSER {}", browser.full_name);
        writeln!(self.sink, "{}", self.theme.banner.apply_to(banner))?;
        writeln!(self.sink)?;
        Ok(())
    }

    fn on_spec_complete(&mut self, _browser: &BrowserInfo, result: &SpecResult) -> Result<()> {
        match SpecStatus::of(result) {
            SpecStatus::Success => self.spec_success(result),
            SpecStatus::Skipped => self.spec_skipped(result),
            SpecStatus::Failure => self.spec_failure(result),
        }
    }

    fn on_browser_log(&mut self, browser: &str, message: &str, level: LogLevel) -> Result<()> {
        if self.options.log_level == LogLevel::Disable || level < self.options.log_level {
            return Ok(());
        }

        let message = self.theme.log_message.apply_to(message);
        // The anonymous form is only for the one-browser steady state; a
        // log arriving before any registration still names its sender.
        if self.browsers_seen == 1 {
            writeln!(self.sink, "{} LOG: {}", level, message)?;
        } else {
            writeln!(self.sink, "{} {} LOG: {}", browser, level, message)?;
        }
        Ok(())
    }

    fn on_browser_complete(&mut self, browser: &BrowserInfo) -> Result<()> {
        if self.options.late_report {
            self.flush()?;
        }

        let result = browser.last_result.clone().unwrap_or_default();
        writeln!(self.sink, "{}", line::counts_line(&self.theme, &result))?;
        writeln!(self.sink)?;
        Ok(())
    }

    fn on_run_complete(&mut self, _browsers: &[BrowserInfo], _results: &RunTotals) -> Result<()> {
        self.flush()?;
        // Watch-mode re-runs start with a clean path and empty buffers
        self.tracker.reset();
        self.stats.reset();
        Ok(())
    }

    fn on_exit(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Reporter;

    fn plain_reporter() -> SpecReporter<Vec<u8>> {
        let options = ReporterOptions {
            colors: false,
            ..ReporterOptions::default()
        };
        SpecReporter::new(Vec::new(), options)
    }

    fn output(reporter: SpecReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).expect("reporter output must be utf-8")
    }

    #[test]
    fn test_browser_register_banner() {
        let mut reporter = plain_reporter();
        reporter
            .on_browser_register(&BrowserInfo::named("Chrome Headless 126.0 (Linux)"))
            .unwrap();

        assert_eq!(output(reporter), "USING BROWSER Chrome Headless 126.0 (Linux)\n\n");
    }

    #[test]
    fn test_log_line_single_browser_omits_the_name() {
        let mut reporter = plain_reporter();
        reporter
            .on_browser_register(&BrowserInfo::named("Chrome 126"))
            .unwrap();
        reporter
            .on_browser_log("Chrome 126", "deprecated API", LogLevel::Warn)
            .unwrap();

        let text = output(reporter);
        assert!(text.ends_with("WARN LOG: deprecated API\n"));
        assert!(!text.contains("Chrome 126 WARN"));
    }

    #[test]
    fn test_log_line_before_any_registration_names_the_sender() {
        let mut reporter = plain_reporter();
        reporter
            .on_browser_log("Chrome 126", "early message", LogLevel::Warn)
            .unwrap();

        assert_eq!(output(reporter), "Chrome 126 WARN LOG: early message\n");
    }

    #[test]
    fn test_log_line_multi_browser_names_the_sender() {
        let mut reporter = plain_reporter();
        reporter
            .on_browser_register(&BrowserInfo::named("Chrome 126"))
            .unwrap();
        reporter
            .on_browser_register(&BrowserInfo::named("Firefox 128"))
            .unwrap();
        reporter
            .on_browser_log("Firefox 128", "mixed content", LogLevel::Error)
            .unwrap();

        assert!(output(reporter).ends_with("Firefox 128 ERROR LOG: mixed content\n"));
    }

    #[test]
    fn test_log_level_gates_quieter_messages() {
        let options = ReporterOptions {
            colors: false,
            log_level: LogLevel::Warn,
            ..ReporterOptions::default()
        };
        let mut reporter = SpecReporter::new(Vec::new(), options);

        reporter
            .on_browser_log("Chrome", "routine detail", LogLevel::Info)
            .unwrap();
        reporter
            .on_browser_log("Chrome", "something broke", LogLevel::Error)
            .unwrap();

        let text = output(reporter);
        assert!(!text.contains("routine detail"));
        assert!(text.contains("something broke"));
    }

    #[test]
    fn test_log_level_disable_echoes_nothing() {
        let options = ReporterOptions {
            colors: false,
            log_level: LogLevel::Disable,
            ..ReporterOptions::default()
        };
        let mut reporter = SpecReporter::new(Vec::new(), options);

        reporter
            .on_browser_log("Chrome", "anything at all", LogLevel::Error)
            .unwrap();

        assert_eq!(output(reporter), "");
    }

    #[test]
    fn test_browser_complete_without_last_result_prints_zeros() {
        let options = ReporterOptions {
            colors: false,
            late_report: false,
            ..ReporterOptions::default()
        };
        let mut reporter = SpecReporter::new(Vec::new(), options);

        reporter
            .on_browser_complete(&BrowserInfo::named("Chrome 126"))
            .unwrap();

        assert_eq!(
            output(reporter),
            "TESTS FINISHED: 0 SUCCESS, 0 SKIPPED, 0 FAILED, 0 TOTAL, 0ms TOTAL TIME\n\n"
        );
    }

    #[test]
    fn test_exit_flushes_the_sink() {
        let mut reporter = plain_reporter();
        assert!(reporter.on_exit().is_ok());
    }
}
