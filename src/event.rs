// Host runner event model
// One JSON object per line, tagged by "event", camelCase field keys

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Severity of a browser console message.
///
/// Ordering follows severity: `Debug < Info < Warn < Error < Disable`.
/// `Disable` is only meaningful as a reporter threshold (echo nothing);
/// the host never sends it on a log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Disable,
}

#[derive(Debug, Error)]
#[error("unknown log level '{0}' (expected debug, info, warn, error or disable)")]
pub struct ParseLogLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "disable" => Ok(Self::Disable),
            _ => Err(ParseLogLevelError(s.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Disable => "DISABLE",
        };
        f.write_str(label)
    }
}

/// A single finished spec as reported by the host runner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecResult {
    pub description: String,

    /// Enclosing suite names, outermost first. Empty for global specs.
    #[serde(default)]
    pub suite: Vec<String>,

    pub success: bool,

    pub skipped: bool,

    /// Wall time of the spec in milliseconds.
    pub time: u64,

    /// Failure messages / stack traces. Absent means nothing to print.
    #[serde(default)]
    pub log: Vec<String>,
}

impl SpecResult {
    /// Build a passing result.
    pub fn passed(description: impl Into<String>, suite: &[&str], time: u64) -> Self {
        Self {
            description: description.into(),
            suite: suite.iter().map(|s| s.to_string()).collect(),
            success: true,
            skipped: false,
            time,
            log: Vec::new(),
        }
    }

    /// Build a failing result with its log entries.
    pub fn failed(description: impl Into<String>, suite: &[&str], time: u64, log: &[&str]) -> Self {
        Self {
            description: description.into(),
            suite: suite.iter().map(|s| s.to_string()).collect(),
            success: false,
            skipped: false,
            time,
            log: log.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Build a skipped result.
    pub fn skipped(description: impl Into<String>, suite: &[&str], time: u64) -> Self {
        Self {
            description: description.into(),
            suite: suite.iter().map(|s| s.to_string()).collect(),
            success: false,
            skipped: true,
            time,
            log: Vec::new(),
        }
    }
}

/// Aggregate counts a browser carries once its run finished.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserResult {
    #[serde(default)]
    pub success: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub skipped: u64,
    #[serde(default)]
    pub total: u64,
    /// Total wall time of the browser run in milliseconds.
    #[serde(default)]
    pub total_time: u64,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub disconnected: bool,
}

/// An execution target registered with the host runner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserInfo {
    #[serde(default)]
    pub id: Option<String>,

    /// Display name, e.g. "Chrome 126.0.0 (Linux x86_64)".
    pub full_name: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Present once the browser completed its run.
    #[serde(default)]
    pub last_result: Option<BrowserResult>,
}

impl BrowserInfo {
    pub fn named(full_name: impl Into<String>) -> Self {
        Self {
            id: None,
            full_name: full_name.into(),
            name: None,
            last_result: None,
        }
    }

    pub fn with_result(full_name: impl Into<String>, last_result: BrowserResult) -> Self {
        Self {
            id: None,
            full_name: full_name.into(),
            name: None,
            last_result: Some(last_result),
        }
    }
}

/// Whole-run aggregate delivered with `run_complete`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTotals {
    #[serde(default)]
    pub success: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub skipped: u64,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub exit_code: Option<i32>,
}

/// One line of the host runner's event stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    BrowserRegister {
        browser: BrowserInfo,
    },
    SpecComplete {
        browser: BrowserInfo,
        result: SpecResult,
    },
    BrowserLog {
        browser: String,
        message: String,
        #[serde(default)]
        level: LogLevel,
    },
    BrowserComplete {
        browser: BrowserInfo,
    },
    RunComplete {
        #[serde(default)]
        browsers: Vec<BrowserInfo>,
        #[serde(default)]
        results: RunTotals,
    },
    Exit,
}

#[derive(Debug, Error)]
pub enum EventDecodeError {
    #[error("invalid event json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a single stream line into an event.
pub fn decode_line(line: &str) -> Result<RunEvent, EventDecodeError> {
    Ok(serde_json::from_str(line.trim())?)
}
