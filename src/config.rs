// Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::event::LogLevel;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub reporter: ReporterConfig,

    #[serde(default)]
    pub prefixes: PrefixConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReporterConfig {
    /// Colorize output
    #[serde(default = "default_colors")]
    pub colors: bool,

    /// Defer failure details to the end-of-run report
    #[serde(default = "default_late_report")]
    pub late_report: bool,

    /// Skip success lines entirely
    #[serde(default)]
    pub suppress_success: bool,

    /// Skip skipped lines entirely
    #[serde(default)]
    pub suppress_skipped: bool,

    /// Skip failure lines entirely
    #[serde(default)]
    pub suppress_failed: bool,

    /// Lines kept per failure log entry (unset keeps everything)
    #[serde(default)]
    pub max_log_lines: Option<usize>,

    /// Times strictly below this are "fast" (milliseconds)
    #[serde(default = "default_fast")]
    pub fast: u64,

    /// Times strictly above this are "slow" (milliseconds)
    #[serde(default = "default_slow")]
    pub slow: u64,

    /// Minimum level of echoed browser console logs
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            late_report: default_late_report(),
            suppress_success: false,
            suppress_skipped: false,
            suppress_failed: false,
            max_log_lines: None,
            fast: default_fast(),
            slow: default_slow(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefixConfig {
    /// Decoration before a passing spec
    #[serde(default = "default_success_prefix")]
    pub success: String,

    /// Decoration before a failing spec
    #[serde(default = "default_failure_prefix")]
    pub failure: String,

    /// Decoration before a skipped spec
    #[serde(default = "default_skipped_prefix")]
    pub skipped: String,
}

impl Default for PrefixConfig {
    fn default() -> Self {
        Self {
            success: default_success_prefix(),
            failure: default_failure_prefix(),
            skipped: default_skipped_prefix(),
        }
    }
}

// Default values
pub const ENV_NO_COLOR: &str = "NO_COLOR";

pub fn default_colors() -> bool {
    true
}

pub fn default_late_report() -> bool {
    true
}

pub fn default_fast() -> u64 {
    20
}

pub fn default_slow() -> u64 {
    40
}

pub fn default_log_level() -> LogLevel {
    LogLevel::Info
}

fn default_success_prefix() -> String {
    String::from("✓ ")
}

fn default_failure_prefix() -> String {
    String::from("✗ ")
}

fn default_skipped_prefix() -> String {
    String::from("  ")
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. .spectifyrc (current directory)
        // 2. ~/.spectifyrc (home directory)
        // 3. .spectifyrc.toml (current directory)
        // 4. ~/.spectifyrc.toml (home directory)

        let cwd = std::env::current_dir().ok()?;
        let home = dirs::home_dir()?;

        let paths = [
            cwd.join(".spectifyrc"),
            home.join(".spectifyrc"),
            cwd.join(".spectifyrc.toml"),
            home.join(".spectifyrc.toml"),
        ];

        for path in &paths {
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        None
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Generate configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }
}

/// Prefix strings for the three spec categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefixes {
    pub success: String,
    pub failure: String,
    pub skipped: String,
}

impl Default for Prefixes {
    fn default() -> Self {
        Self {
            success: default_success_prefix(),
            failure: default_failure_prefix(),
            skipped: default_skipped_prefix(),
        }
    }
}

/// Merged, immutable options the reporter is constructed with.
///
/// Built once from file config, environment and CLI flags; nothing mutates
/// it afterwards.
#[derive(Debug, Clone)]
pub struct ReporterOptions {
    pub colors: bool,
    pub late_report: bool,
    pub suppress_success: bool,
    pub suppress_skipped: bool,
    pub suppress_failed: bool,
    pub max_log_lines: Option<usize>,
    pub prefixes: Prefixes,
    pub fast_ms: u64,
    pub slow_ms: u64,
    pub log_level: LogLevel,
}

impl Default for ReporterOptions {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            late_report: default_late_report(),
            suppress_success: false,
            suppress_skipped: false,
            suppress_failed: false,
            max_log_lines: None,
            prefixes: Prefixes::default(),
            fast_ms: default_fast(),
            slow_ms: default_slow(),
            log_level: default_log_level(),
        }
    }
}

impl ReporterOptions {
    /// Options as a configuration file sets them (defaults when absent).
    pub fn from_config(config: Option<&Config>) -> Self {
        match config {
            Some(cfg) => Self {
                colors: cfg.reporter.colors,
                late_report: cfg.reporter.late_report,
                suppress_success: cfg.reporter.suppress_success,
                suppress_skipped: cfg.reporter.suppress_skipped,
                suppress_failed: cfg.reporter.suppress_failed,
                max_log_lines: cfg.reporter.max_log_lines,
                prefixes: Prefixes {
                    success: cfg.prefixes.success.clone(),
                    failure: cfg.prefixes.failure.clone(),
                    skipped: cfg.prefixes.skipped.clone(),
                },
                fast_ms: cfg.reporter.fast,
                slow_ms: cfg.reporter.slow,
                log_level: cfg.reporter.log_level,
            },
            None => Self::default(),
        }
    }
}
