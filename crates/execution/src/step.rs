//! Runtime record of one step's votes.

use std::collections::BTreeMap;

use quorum_core::{ApproverId, StepId};
use serde::{Deserialize, Serialize};

use crate::vote::Vote;

/// Votes collected for one template step.
///
/// Created when the step receives its first vote. An approver holds at most one
/// vote per step; voting again overwrites the earlier vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInstance {
    /// The template step this record belongs to.
    pub step_id: StepId,
    /// Approver → `true` (approve) / `false` (reject).
    #[serde(default)]
    pub approvals: BTreeMap<ApproverId, bool>,
    /// Approver → rationale. Keys are a subset of `approvals`.
    #[serde(default)]
    pub reasons: BTreeMap<ApproverId, String>,
    /// Set once the step's quorum decision has been made.
    #[serde(default)]
    pub finished: bool,
}

impl StepInstance {
    /// An empty, open record for `step_id`.
    #[must_use]
    pub fn new(step_id: StepId) -> Self {
        Self {
            step_id,
            approvals: BTreeMap::new(),
            reasons: BTreeMap::new(),
            finished: false,
        }
    }

    /// Upsert `vote`. A missing reason leaves any earlier reason in place.
    pub fn cast(&mut self, vote: &Vote) {
        self.approvals.insert(vote.approver.clone(), vote.approve);
        if let Some(reason) = &vote.reason {
            self.reasons.insert(vote.approver.clone(), reason.clone());
        }
    }

    /// The vote `approver` currently holds, if any.
    #[must_use]
    pub fn vote_of(&self, approver: &ApproverId) -> Option<bool> {
        self.approvals.get(approver).copied()
    }
}
