//! Query inputs and operation results.

use quorum_execution::{Outcome, WorkflowInstance};
use serde::{Deserialize, Serialize};

/// Offset pagination for template listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Records to skip.
    pub offset: usize,
    /// Maximum records to return.
    pub limit: usize,
}

impl Page {
    /// Page size used when none is given.
    pub const DEFAULT_LIMIT: usize = 50;

    /// A page of `limit` records starting at `offset`.
    #[must_use]
    pub const fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// The result of a successfully recorded vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    /// The instance as stored after the vote.
    pub instance: WorkflowInstance,
    /// Decision for the step the vote was cast on.
    pub outcome: Outcome,
    /// Compare-and-swap attempts it took to persist.
    pub attempts: u32,
}
