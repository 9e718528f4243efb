//! Instance-level status tracking.

use serde::{Deserialize, Serialize};

/// The overall status of a workflow instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    /// Still collecting votes.
    #[default]
    Pending,
    /// Every step reached an approving majority.
    Approved,
    /// Some step reached a rejecting majority.
    Rejected,
}

impl InstanceStatus {
    /// Returns `true` if the instance has reached a final state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns `true` if the instance finished with approval.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}
