//! Execution error types.

use quorum_core::{ApproverId, InstanceId, StepId, TemplateId};
use thiserror::Error;

use crate::status::InstanceStatus;

/// Errors that can occur while applying a vote to an instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The instance is finished; its record is permanent.
    #[error("instance {instance_id} is already {status}")]
    AlreadyDone {
        /// The finished instance.
        instance_id: InstanceId,
        /// Its terminal status.
        status: InstanceStatus,
    },

    /// The voter is not in the current step's approver set.
    #[error("{approver} is not an approver for step {step_index}")]
    NotAnApprover {
        /// The rejected voter.
        approver: ApproverId,
        /// Zero-based index of the open step.
        step_index: usize,
    },

    /// The template handed in is not the one the instance was created from.
    #[error("instance is bound to template {expected}, got {found}")]
    TemplateMismatch {
        /// Template id stored on the instance.
        expected: TemplateId,
        /// Template id supplied by the caller.
        found: TemplateId,
    },

    /// The current step index does not address a template step.
    #[error("step index {index} out of range for template with {step_count} steps")]
    StepOutOfRange {
        /// Offending index.
        index: usize,
        /// Steps in the template.
        step_count: usize,
    },

    /// The stored step records disagree with the current step index.
    #[error("step record {record} belongs to step {found}, expected step {expected}")]
    StepMismatch {
        /// Position of the record.
        record: usize,
        /// Step id the template has at that position.
        expected: StepId,
        /// Step id found in the record.
        found: StepId,
    },

    /// The number of step records is not consistent with the current step.
    #[error("instance has {records} step records at step index {index}")]
    InconsistentProgress {
        /// Step records present.
        records: usize,
        /// Current step index.
        index: usize,
    },

    /// A phase transition is not valid.
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition {
        /// Current phase.
        from: String,
        /// Attempted target phase.
        to: String,
    },
}
