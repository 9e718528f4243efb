//! A single approver's ballot.

use quorum_core::ApproverId;
use serde::{Deserialize, Serialize};

/// One vote on the current step of an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Who is voting. Resolved by the authorization layer.
    pub approver: ApproverId,
    /// `true` to approve, `false` to reject.
    pub approve: bool,
    /// Optional free-text rationale.
    #[serde(default)]
    pub reason: Option<String>,
}

impl Vote {
    /// An approving vote without a reason.
    #[must_use]
    pub fn approve(approver: ApproverId) -> Self {
        Self {
            approver,
            approve: true,
            reason: None,
        }
    }

    /// A rejecting vote without a reason.
    #[must_use]
    pub fn reject(approver: ApproverId) -> Self {
        Self {
            approver,
            approve: false,
            reason: None,
        }
    }

    /// Attach a rationale.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
