//! Logger configuration.
//!
//! - [`Config`] with its [`Format`], [`WriterConfig`] and [`DisplayConfig`]
//! - presets: `development`, `production`, `from_env`

mod presets;

use std::io::IsTerminal;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filter directives, e.g. `"info"` or `"info,quorum_engine=debug"`.
    pub level: String,
    /// Output format.
    pub format: Format,
    /// Output stream.
    pub writer: WriterConfig,
    /// Which metadata to print.
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Compact,
            writer: WriterConfig::Stderr,
            display: DisplayConfig::default(),
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Multi-line, human-readable.
    Pretty,
    /// One line per event.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl FromStr for Format {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(LogError::UnknownFormat(other.to_string())),
        }
    }
}

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriterConfig {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
}

/// Display toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show timestamps.
    pub time: bool,
    /// Show `file:line`.
    pub source: bool,
    /// Show the event target (module path).
    pub target: bool,
    /// Show thread ids.
    pub thread_ids: bool,
    /// Show thread names.
    pub thread_names: bool,
    /// ANSI colors.
    pub colors: bool,
    /// Include the span list in JSON output.
    pub span_list: bool,
    /// Put event fields at the top level of JSON output.
    pub flatten: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time: true,
            source: cfg!(debug_assertions),
            target: true,
            thread_ids: false,
            thread_names: false,
            colors: std::io::stderr().is_terminal(),
            span_list: true,
            flatten: true,
        }
    }
}

impl DisplayConfig {
    /// Apply `QUORUM_LOG_TIME`, `QUORUM_LOG_SOURCE` and `QUORUM_LOG_COLORS`.
    pub(crate) fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("QUORUM_LOG_TIME") {
            self.time = flag(&v);
        }
        if let Some(v) = var("QUORUM_LOG_SOURCE") {
            self.source = flag(&v);
        }
        if let Some(v) = var("QUORUM_LOG_COLORS") {
            self.colors = flag(&v);
        }
    }
}

fn flag(value: &str) -> bool {
    !matches!(value.trim(), "0" | "false" | "off" | "no")
}
