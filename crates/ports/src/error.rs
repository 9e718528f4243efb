//! Error types for port operations.
//!
//! Drivers map whatever their backend reports into these variants so the
//! engine can tell a missing record from a lost race from an unreachable store.

use std::fmt;
use std::time::Duration;

use quorum_core::{InstanceId, TemplateId};
use serde::{Deserialize, Serialize};

/// Which kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    /// A workflow template.
    Template,
    /// A workflow instance.
    Instance,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => write!(f, "template"),
            Self::Instance => write!(f, "instance"),
        }
    }
}

/// Error type for all port operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortsError {
    /// No record with this id.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of record looked up.
        entity: Entity,
        /// Raw id that was looked up.
        id: u64,
    },

    /// The stored version moved on since the caller read it.
    ///
    /// Drivers may report a lost race either as this error or as `Ok(false)`
    /// from `compare_and_swap`; the engine retries both.
    #[error("{entity} {id}: expected version {expected_version}, found {actual_version}")]
    Conflict {
        /// Kind of record.
        entity: Entity,
        /// Raw id of the record.
        id: u64,
        /// Version the caller expected.
        expected_version: u64,
        /// Version currently stored.
        actual_version: u64,
    },

    /// The backend could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// A stored record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backend did not answer in time.
    #[error("{operation} timed out after {duration:?}")]
    Timeout {
        /// Name of the operation.
        operation: String,
        /// How long was waited.
        duration: Duration,
    },

    /// Anything else the backend reports.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PortsError {
    /// [`PortsError::NotFound`] for a template.
    #[must_use]
    pub const fn template_not_found(id: TemplateId) -> Self {
        Self::NotFound {
            entity: Entity::Template,
            id: id.get(),
        }
    }

    /// [`PortsError::NotFound`] for an instance.
    #[must_use]
    pub const fn instance_not_found(id: InstanceId) -> Self {
        Self::NotFound {
            entity: Entity::Instance,
            id: id.get(),
        }
    }

    /// Convenience constructor for [`PortsError::Conflict`].
    #[must_use]
    pub const fn conflict(entity: Entity, id: u64, expected: u64, actual: u64) -> Self {
        Self::Conflict {
            entity,
            id,
            expected_version: expected,
            actual_version: actual,
        }
    }

    /// Convenience constructor for [`PortsError::Timeout`].
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Returns `true` for transient backend failures.
    ///
    /// Currently [`Connection`](Self::Connection) and [`Timeout`](Self::Timeout).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout { .. })
    }

    /// Returns `true` for [`NotFound`](Self::NotFound).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn not_found_constructors() {
        assert_eq!(
            PortsError::template_not_found(TemplateId::new(3)),
            PortsError::NotFound {
                entity: Entity::Template,
                id: 3,
            }
        );
        assert!(PortsError::instance_not_found(InstanceId::new(9)).is_not_found());
    }

    #[test]
    fn transient_failures_are_retryable() {
        assert!(PortsError::Connection("refused".into()).is_retryable());
        assert!(PortsError::timeout("get", Duration::from_secs(1)).is_retryable());
    }

    #[test]
    fn permanent_failures_are_not_retryable() {
        assert!(!PortsError::template_not_found(TemplateId::new(1)).is_retryable());
        assert!(!PortsError::conflict(Entity::Instance, 1, 1, 2).is_retryable());
        assert!(!PortsError::Serialization("bad".into()).is_retryable());
        assert!(!PortsError::Internal("oops".into()).is_retryable());
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            PortsError::instance_not_found(InstanceId::new(4)).to_string(),
            "instance 4 not found"
        );
        assert_eq!(
            PortsError::conflict(Entity::Template, 2, 1, 3).to_string(),
            "template 2: expected version 1, found 3"
        );
        assert_eq!(
            PortsError::timeout("compare_and_swap", Duration::from_millis(250)).to_string(),
            "compare_and_swap timed out after 250ms"
        );
    }

    #[test]
    fn entity_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Entity::Instance).unwrap(), "\"instance\"");
    }
}
