// CLI argument definitions using Clap

use clap::Parser;
use std::path::PathBuf;

use crate::config::{self, Config, ReporterOptions};

/// Spec-style console reporter for test-runner event streams
#[derive(Parser, Debug)]
#[command(name = "spectify")]
#[command(author = "spectify team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render test-runner events as nested spec output", long_about = None)]
pub struct Cli {
    /// Event stream to read, one JSON event per line ("-" reads stdin)
    #[arg(value_name = "EVENTS", default_value = "-")]
    pub events: PathBuf,

    /// Disable colored output
    #[arg(short = 'c', long, default_value_t = false)]
    pub no_color: bool,

    /// Print failure backtraces inline instead of deferring them
    #[arg(long, default_value_t = false)]
    pub immediate: bool,

    /// Skip lines for passing specs
    #[arg(long, default_value_t = false)]
    pub suppress_success: bool,

    /// Skip lines for skipped specs
    #[arg(long, default_value_t = false)]
    pub suppress_skipped: bool,

    /// Skip lines for failing specs
    #[arg(long, default_value_t = false)]
    pub suppress_failed: bool,

    /// Keep at most N lines per failure log entry
    #[arg(long, value_name = "N")]
    pub max_log_lines: Option<usize>,

    /// Fast threshold in milliseconds (times strictly below render green)
    #[arg(long, value_name = "MS")]
    pub fast: Option<u64>,

    /// Slow threshold in milliseconds (times strictly above render red)
    #[arg(long, value_name = "MS")]
    pub slow: Option<u64>,

    /// Minimum level of echoed browser console logs
    #[arg(long, value_name = "LEVEL", value_parser = ["debug", "info", "warn", "error", "disable"])]
    pub log_level: Option<String>,

    /// Enable verbose debug output
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,

    /// Install shell completion (bash, zsh, fish, elvish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_parser = ["bash", "zsh", "fish", "elvish", "powershell"])]
    pub completion: Option<String>,
}

impl Cli {
    /// Whether the event stream comes from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.events.as_os_str() == "-"
    }

    /// Merge file config, environment and flags into reporter options.
    ///
    /// Flags override the file; the file overrides built-in defaults.
    /// Disabling colors is sticky: `--no-color`, the `NO_COLOR` variable
    /// or `colors = false` in the file each turn colors off, and nothing
    /// turns them back on.
    pub fn reporter_options(&self, file: Option<&Config>) -> ReporterOptions {
        let mut options = ReporterOptions::from_config(file);

        if self.no_color || std::env::var_os(config::ENV_NO_COLOR).is_some() {
            options.colors = false;
        }
        if self.immediate {
            options.late_report = false;
        }
        if self.suppress_success {
            options.suppress_success = true;
        }
        if self.suppress_skipped {
            options.suppress_skipped = true;
        }
        if self.suppress_failed {
            options.suppress_failed = true;
        }
        if let Some(max) = self.max_log_lines {
            options.max_log_lines = Some(max);
        }
        if let Some(fast) = self.fast {
            options.fast_ms = fast;
        }
        if let Some(slow) = self.slow {
            options.slow_ms = slow;
        }
        if let Some(level) = &self.log_level {
            // The value_parser list already rejected anything else
            if let Ok(parsed) = level.parse() {
                options.log_level = parsed;
            }
        }

        options
    }
}
