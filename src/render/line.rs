// Single-line formatting for the spec reporter

use crate::event::BrowserResult;
use crate::render::path::{SuiteHeader, indent};
use crate::render::theme::Theme;
use crate::state::SpecStatus;

/// Indented, unstyled suite header.
pub fn suite_header(header: &SuiteHeader) -> String {
    format!("{}{}", indent(header.depth), header.name)
}

/// Status-prefixed, time-annotated leaf line at the given depth.
pub fn spec_line(
    theme: &Theme,
    depth: usize,
    status: SpecStatus,
    description: &str,
    time_ms: u64,
) -> String {
    let body = format!("{}{}", theme.prefix(status), description);
    format!(
        "{}{}{}",
        indent(depth),
        theme.status_style(status).apply_to(body),
        time_annotation(theme, time_ms),
    )
}

/// ` (<time> ms)`, styled by the three-bucket threshold policy.
pub fn time_annotation(theme: &Theme, time_ms: u64) -> String {
    let text = format!(" ({} ms)", time_ms);
    theme.time_style(time_ms as f64).apply_to(text).to_string()
}

/// ` (<mean> ms)` with two decimals, same bucket policy as single specs.
pub fn average_annotation(theme: &Theme, mean_ms: f64) -> String {
    let text = format!(" ({:.2} ms)", mean_ms);
    theme.time_style(mean_ms).apply_to(text).to_string()
}

/// Formatted failure log: a blank line, then each entry tab-indented.
///
/// Entries are truncated to `max_log_lines` lines each before indenting.
/// Empty logs produce an empty string.
pub fn backtrace(theme: &Theme, log: &[String], max_log_lines: Option<usize>) -> String {
    if log.is_empty() {
        return String::new();
    }

    let mut body = String::from("\n");
    for entry in log {
        let kept: Vec<&str> = match max_log_lines {
            Some(max) => entry.lines().take(max).collect(),
            None => entry.lines().collect(),
        };
        body.push('\n');
        for (i, line) in kept.iter().enumerate() {
            if i > 0 {
                body.push('\n');
            }
            body.push('\t');
            body.push_str(line);
        }
    }

    theme.backtrace.apply_to(body).to_string()
}

/// The browser-complete counts line, each number in its own color.
pub fn counts_line(theme: &Theme, result: &BrowserResult) -> String {
    format!(
        "{}{}{}{}{}{}{}{}{}{}{}",
        theme.banner.apply_to("TESTS FINISHED: "),
        theme.success_count.apply_to(result.success.to_string()),
        theme.banner.apply_to(" SUCCESS, "),
        theme.skipped_count.apply_to(result.skipped.to_string()),
        theme.banner.apply_to(" SKIPPED, "),
        theme.failed_count.apply_to(result.failed.to_string()),
        theme.banner.apply_to(" FAILED, "),
        theme.total_count.apply_to(result.total.to_string()),
        theme.banner.apply_to(" TOTAL, "),
        theme.total_time.apply_to(format!("{}ms", result.total_time)),
        theme.banner.apply_to(" TOTAL TIME"),
    )
}

/// Header of the deferred failure report.
pub fn late_header(theme: &Theme, failed: usize) -> String {
    theme
        .late_header
        .apply_to(format!("{} TEST(S) FAILED:", failed))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReporterOptions;

    fn plain_theme() -> Theme {
        let mut options = ReporterOptions::default();
        options.colors = false;
        Theme::new(&options)
    }

    #[test]
    fn test_spec_line_layout() {
        let theme = plain_theme();
        let line = spec_line(&theme, 1, SpecStatus::Success, "adds numbers", 12);
        assert_eq!(line, "  ✓ adds numbers (12 ms)");
    }

    #[test]
    fn test_spec_line_depth_indents() {
        let theme = plain_theme();
        let line = spec_line(&theme, 3, SpecStatus::Failure, "breaks", 50);
        assert_eq!(line, "      ✗ breaks (50 ms)");
    }

    #[test]
    fn test_skipped_prefix_is_blank() {
        let theme = plain_theme();
        let line = spec_line(&theme, 1, SpecStatus::Skipped, "later", 0);
        assert_eq!(line, "    later (0 ms)");
    }

    #[test]
    fn test_average_annotation_two_decimals() {
        let theme = plain_theme();
        assert_eq!(average_annotation(&theme, 65.0 / 3.0), " (21.67 ms)");
    }

    #[test]
    fn test_backtrace_indents_every_line() {
        let theme = plain_theme();
        let log = vec!["first\nsecond".to_string(), "third".to_string()];
        let text = backtrace(&theme, &log, None);
        assert_eq!(text, "\n\n\tfirst\n\tsecond\n\tthird");
    }

    #[test]
    fn test_backtrace_truncates_each_entry() {
        let theme = plain_theme();
        let log = vec!["a\nb\nc\nd".to_string(), "e\nf".to_string()];
        let text = backtrace(&theme, &log, Some(2));
        assert_eq!(text, "\n\n\ta\n\tb\n\te\n\tf");
    }

    #[test]
    fn test_backtrace_empty_log() {
        let theme = plain_theme();
        assert_eq!(backtrace(&theme, &[], Some(5)), "");
    }

    #[test]
    fn test_counts_line_plain() {
        let theme = plain_theme();
        let result = BrowserResult {
            success: 5,
            failed: 1,
            skipped: 2,
            total: 8,
            total_time: 321,
            error: false,
            disconnected: false,
        };
        assert_eq!(
            counts_line(&theme, &result),
            "TESTS FINISHED: 5 SUCCESS, 2 SKIPPED, 1 FAILED, 8 TOTAL, 321ms TOTAL TIME"
        );
    }

    #[test]
    fn test_late_header_count() {
        let theme = plain_theme();
        assert_eq!(late_header(&theme, 3), "3 TEST(S) FAILED:");
    }

    #[test]
    fn test_suite_header_indent() {
        let header = SuiteHeader {
            name: "math".to_string(),
            depth: 2,
        };
        assert_eq!(suite_header(&header), "    math");
    }
}
