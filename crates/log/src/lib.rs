#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Quorum Log
//!
//! Logger setup for Quorum binaries on top of `tracing-subscriber`.
//!
//! Libraries in the workspace only emit events through `tracing`; a binary
//! picks a [`Config`] (from a preset, the environment, or its own config file)
//! and installs it once with [`LoggerBuilder`].
//!
//! ```rust,no_run
//! use quorum_log::{Config, LoggerBuilder};
//!
//! # fn main() -> Result<(), quorum_log::LogError> {
//! let _guard = LoggerBuilder::from_config(Config::from_env()).build()?;
//! tracing::info!("ready");
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;
mod error;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format, WriterConfig};
pub use error::{LogError, LogResult};

/// Install the logger described by `config`.
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
