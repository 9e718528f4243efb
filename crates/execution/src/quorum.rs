//! Quorum aggregation: turning a step's votes into an outcome.
//!
//! Both decisions use a strict majority of the step's eligible approvers
//! (`count > total / 2`, integer division). Rejection is checked first; the two
//! majorities are disjoint, so at most one of them can hold.

use std::collections::{BTreeMap, BTreeSet};

use quorum_core::ApproverId;
use serde::{Deserialize, Serialize};

/// The decision for a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Neither majority reached yet.
    Pending,
    /// A strict majority approved; the step is finished.
    Approved,
    /// A strict majority rejected; the whole instance is finished.
    Rejected,
}

impl Outcome {
    /// Returns `true` once the step has been decided either way.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Vote counts for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tally {
    /// Size of the step's approver set.
    pub eligible: usize,
    /// Approving votes from eligible approvers.
    pub approve: usize,
    /// Rejecting votes from eligible approvers.
    pub reject: usize,
}

impl Tally {
    /// Count `approvals`, ignoring any key outside `approvers`.
    #[must_use]
    pub fn count(approvers: &BTreeSet<ApproverId>, approvals: &BTreeMap<ApproverId, bool>) -> Self {
        let (approve, reject) = approvals
            .iter()
            .filter(|(who, _)| approvers.contains(*who))
            .fold((0, 0), |(yes, no), (_, &vote)| {
                if vote { (yes + 1, no) } else { (yes, no + 1) }
            });
        Self {
            eligible: approvers.len(),
            approve,
            reject,
        }
    }

    /// Apply the reject-then-approve majority rules.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        let half = self.eligible / 2;
        if self.reject > half {
            Outcome::Rejected
        } else if self.approve > half {
            Outcome::Approved
        } else {
            Outcome::Pending
        }
    }
}

/// Decide a step from its approver set and the votes cast so far.
#[must_use]
pub fn decide(approvers: &BTreeSet<ApproverId>, approvals: &BTreeMap<ApproverId, bool>) -> Outcome {
    Tally::count(approvers, approvals).outcome()
}
