//! Logger setup errors.

/// Result alias for logger operations.
pub type LogResult<T> = Result<T, LogError>;

/// Errors raised while configuring or installing the logger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    /// The level filter directive could not be parsed.
    #[error("invalid filter '{filter}': {reason}")]
    Filter {
        /// The directive string.
        filter: String,
        /// Parser message.
        reason: String,
    },

    /// The format name is not one of `pretty`, `compact`, `json`.
    #[error("unknown log format '{0}'")]
    UnknownFormat(String),

    /// A global subscriber is already installed.
    #[error("a global logger is already installed")]
    AlreadyInitialized,
}
