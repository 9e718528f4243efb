//! Workflow-specific error types.

use thiserror::Error;

use crate::status::TemplateStatus;

/// Errors that can occur while validating or changing a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Template name must not be empty.
    #[error("template name must not be empty")]
    EmptyName,

    /// Template must have at least one step.
    #[error("template must have at least one step")]
    NoSteps,

    /// A step has a blank name.
    #[error("step {index} name must not be empty")]
    EmptyStepName {
        /// Zero-based position of the step.
        index: usize,
    },

    /// A step has nobody who can vote on it.
    #[error("step {index} ('{name}') has an empty approver set")]
    EmptyApproverSet {
        /// Zero-based position of the step.
        index: usize,
        /// Name of the step.
        name: String,
    },

    /// A lifecycle transition is not allowed.
    #[error("invalid template transition from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: TemplateStatus,
        /// Attempted target status.
        to: TemplateStatus,
    },

    /// The template is frozen and its contents cannot change.
    #[error("template is {status} and can no longer be edited")]
    NotEditable {
        /// Current status.
        status: TemplateStatus,
    },
}

impl WorkflowError {
    /// Returns `true` for errors describing malformed input rather than lifecycle misuse.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyName
                | Self::NoSteps
                | Self::EmptyStepName { .. }
                | Self::EmptyApproverSet { .. }
        )
    }
}
