//! State machine transition validation for instance phases.
//!
//! An instance is `Pending(i)` for `i` in `[0, step_count)` until it reaches one of
//! the terminal phases `Approved` or `Rejected`. Terminal phases have no
//! outgoing transitions.

use serde::{Deserialize, Serialize};

use crate::error::ExecutionError;

/// Where an instance stands in its template's step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum InstancePhase {
    /// Waiting for votes on step `step_index`.
    Pending {
        /// Zero-based index of the open step.
        step_index: usize,
    },
    /// Every step approved.
    Approved,
    /// A step rejected.
    Rejected,
}

impl InstancePhase {
    /// Returns `true` for `Approved` and `Rejected`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl std::fmt::Display for InstancePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending { step_index } => write!(f, "pending(step {step_index})"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Returns `true` if moving from `from` to `to` is valid for a template with
/// `step_count` steps.
#[must_use]
pub fn can_transition_instance(from: InstancePhase, to: InstancePhase, step_count: usize) -> bool {
    match (from, to) {
        (InstancePhase::Pending { step_index: i }, InstancePhase::Pending { step_index: j }) => {
            j == i + 1 && j < step_count
        }
        (InstancePhase::Pending { step_index }, InstancePhase::Approved) => {
            step_index + 1 == step_count
        }
        (InstancePhase::Pending { step_index }, InstancePhase::Rejected) => {
            step_index < step_count
        }
        _ => false,
    }
}

/// Validate an instance-level transition, returning an error if invalid.
pub fn validate_instance_transition(
    from: InstancePhase,
    to: InstancePhase,
    step_count: usize,
) -> Result<(), ExecutionError> {
    if can_transition_instance(from, to, step_count) {
        Ok(())
    } else {
        Err(ExecutionError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}
