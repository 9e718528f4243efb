//! Configuration presets for common scenarios

use super::{Config, DisplayConfig, Format};

impl Config {
    /// Configuration from the environment.
    ///
    /// `QUORUM_LOG` (falling back to `RUST_LOG`) sets the filter and
    /// `QUORUM_LOG_FORMAT` the format; an unknown format keeps the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(level) = var("QUORUM_LOG").or_else(|| var("RUST_LOG")) {
            config.level = level;
        }
        if let Some(format) = var("QUORUM_LOG_FORMAT") {
            config.format = format.parse().unwrap_or_default();
        }
        config.display.apply_env(&var);
        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            display: DisplayConfig {
                colors: true,
                source: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                source: false,
                flatten: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quorum_log_wins_over_rust_log() {
        let cfg = Config::from_vars(|name| match name {
            "QUORUM_LOG" => Some("warn".into()),
            "RUST_LOG" => Some("trace".into()),
            _ => None,
        });
        assert_eq!(cfg.level, "warn");
    }

    #[test]
    fn rust_log_is_fallback() {
        let cfg = Config::from_vars(|name| (name == "RUST_LOG").then(|| "debug".to_string()));
        assert_eq!(cfg.level, "debug");
        assert_eq!(cfg.format, Format::Compact);
    }

    #[test]
    fn format_from_env() {
        let cfg = Config::from_vars(|name| (name == "QUORUM_LOG_FORMAT").then(|| "json".to_string()));
        assert_eq!(cfg.format, Format::Json);
        let cfg = Config::from_vars(|name| (name == "QUORUM_LOG_FORMAT").then(|| "xml".to_string()));
        assert_eq!(cfg.format, Format::Compact);
    }

    #[test]
    fn presets() {
        assert_eq!(Config::development().format, Format::Pretty);
        assert_eq!(Config::production().format, Format::Json);
        assert!(!Config::production().display.colors);
    }
}
