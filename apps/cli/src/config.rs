//! Layered application configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::ValueEnum;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use quorum_engine::EngineConfig;
use serde::{Deserialize, Serialize};

/// Default config file, read from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "quorum.toml";

/// Everything the binary can be configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logger settings.
    pub log: quorum_log::Config,
    /// Engine settings.
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log: quorum_log::Config {
                level: "warn".to_string(),
                ..quorum_log::Config::default()
            },
            engine: EngineConfig::default(),
        }
    }
}

/// Named logger setups selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogPreset {
    /// Pretty output at debug level.
    Development,
    /// JSON lines at info level.
    Production,
}

impl LogPreset {
    fn config(self) -> quorum_log::Config {
        match self {
            Self::Development => quorum_log::Config::development(),
            Self::Production => quorum_log::Config::production(),
        }
    }
}

/// Command-line overrides, applied last.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Explicit config file; must exist when given.
    pub config_file: Option<PathBuf>,
    /// Replaces the built-in `log` defaults; file, env and flags still apply on top.
    pub log_preset: Option<LogPreset>,
    /// Replaces `log.level`.
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Defaults, then the TOML file, then `QUORUM_*` variables, then flags.
    ///
    /// Nested keys use `__` in variable names, e.g.
    /// `QUORUM_ENGINE__RETRY__MAX_ATTEMPTS=3`.
    pub fn load(overrides: &Overrides) -> anyhow::Result<Self> {
        let file = match &overrides.config_file {
            Some(path) if !path.is_file() => {
                bail!("config file {} does not exist", path.display())
            }
            Some(path) => path.clone(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };
        Self::figment(&file, overrides)
            .extract()
            .with_context(|| format!("loading configuration (file: {})", file.display()))
    }

    fn figment(file: &Path, overrides: &Overrides) -> Figment {
        let mut defaults = Self::default();
        if let Some(preset) = overrides.log_preset {
            defaults.log = preset.config();
        }
        let mut figment = Figment::from(Serialized::defaults(defaults))
            .merge(Toml::file(file))
            .merge(
                Env::prefixed("QUORUM_")
                    .split("__")
                    .filter(|key| is_section_key(key.as_str())),
            );
        if let Some(level) = &overrides.log_level {
            figment = figment.merge(Serialized::default("log.level", level));
        }
        figment
    }
}

/// Only nested keys belong to this config; flat ones such as `QUORUM_LOG`
/// are read by the logger presets instead.
fn is_section_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.starts_with("log.") || key.starts_with("engine.")
}
