//! Engine error types.

use std::fmt;

use quorum_core::{InstanceId, TemplateId};
use quorum_execution::{ExecutionError, InstanceStatus};
use quorum_ports::{Entity, PortsError};
use quorum_workflow::{TemplateStatus, WorkflowError};
use serde::{Deserialize, Serialize};

/// Coarse classification of an [`EngineError`], stable across variants.
///
/// A transport layer maps these to its own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed input.
    Validation,
    /// Unknown template, instance or step record.
    NotFound,
    /// The operation is illegal in the record's current lifecycle state.
    InvalidState,
    /// The voter is not an approver of the open step.
    Forbidden,
    /// There is no next step.
    OutOfRange,
    /// Optimistic write collisions exhausted the retry budget.
    Conflict,
    /// The store failed or could not be reached.
    Unavailable,
}

impl ErrorKind {
    /// Returns `true` when the caller has to change the request to succeed.
    #[must_use]
    pub fn is_client_error(self) -> bool {
        !matches!(self, Self::Conflict | Self::Unavailable)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::InvalidState => "invalid_state",
            Self::Forbidden => "forbidden",
            Self::OutOfRange => "out_of_range",
            Self::Conflict => "conflict",
            Self::Unavailable => "unavailable",
        };
        f.write_str(s)
    }
}

/// Errors from the engine layer.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Template input failed validation. Every problem found is listed.
    #[error("invalid template: {}", join(.0))]
    Validation(Vec<WorkflowError>),

    /// No template with this id.
    #[error("template {id} not found")]
    TemplateNotFound {
        /// The missing template.
        id: TemplateId,
    },

    /// No instance with this id.
    #[error("instance {id} not found")]
    InstanceNotFound {
        /// The missing instance.
        id: InstanceId,
    },

    /// The open step has no vote record yet, or the instance is fully approved.
    #[error("instance {instance_id} has no record for step {step_index}")]
    StepNotFound {
        /// The instance queried.
        instance_id: InstanceId,
        /// Its current step index.
        step_index: usize,
    },

    /// Instances can only be created from Published templates.
    #[error("template {id} is {status}, not published")]
    TemplateNotPublished {
        /// The template.
        id: TemplateId,
        /// Its status.
        status: TemplateStatus,
    },

    /// Only Draft templates can be deleted.
    #[error("template {id} is {status} and cannot be deleted")]
    TemplateNotDeletable {
        /// The template.
        id: TemplateId,
        /// Its status.
        status: TemplateStatus,
    },

    /// Finished instances are kept as the approval record.
    #[error("instance {id} is {status} and cannot be deleted")]
    InstanceDone {
        /// The instance.
        id: InstanceId,
        /// Its terminal status.
        status: InstanceStatus,
    },

    /// The instance is on its last step or already finished.
    #[error("instance {instance_id} has no next step")]
    NoNextStep {
        /// The instance queried.
        instance_id: InstanceId,
    },

    /// A template lifecycle rule was violated.
    #[error(transparent)]
    Template(WorkflowError),

    /// A vote could not be applied.
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// Every compare-and-swap attempt lost to a concurrent writer.
    #[error("{entity} {id}: gave up after {attempts} conflicting writes")]
    Conflict {
        /// Kind of record.
        entity: Entity,
        /// Raw id of the record.
        id: u64,
        /// Attempts made.
        attempts: u32,
    },

    /// The store reported a failure.
    #[error("store error: {0}")]
    Store(PortsError),
}

impl EngineError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::TemplateNotFound { .. }
            | Self::InstanceNotFound { .. }
            | Self::StepNotFound { .. } => ErrorKind::NotFound,
            Self::TemplateNotPublished { .. }
            | Self::TemplateNotDeletable { .. }
            | Self::InstanceDone { .. } => ErrorKind::InvalidState,
            Self::NoNextStep { .. } => ErrorKind::OutOfRange,
            Self::Template(e) if e.is_validation() => ErrorKind::Validation,
            Self::Template(_) => ErrorKind::InvalidState,
            Self::Execution(ExecutionError::NotAnApprover { .. }) => ErrorKind::Forbidden,
            Self::Execution(_) => ErrorKind::InvalidState,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Store(PortsError::NotFound { .. }) => ErrorKind::NotFound,
            Self::Store(PortsError::Conflict { .. }) => ErrorKind::Conflict,
            Self::Store(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<WorkflowError> for EngineError {
    fn from(err: WorkflowError) -> Self {
        Self::Template(err)
    }
}

impl From<Vec<WorkflowError>> for EngineError {
    fn from(errors: Vec<WorkflowError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<PortsError> for EngineError {
    fn from(err: PortsError) -> Self {
        match err {
            PortsError::NotFound {
                entity: Entity::Template,
                id,
            } => Self::TemplateNotFound {
                id: TemplateId::new(id),
            },
            PortsError::NotFound {
                entity: Entity::Instance,
                id,
            } => Self::InstanceNotFound {
                id: InstanceId::new(id),
            },
            other => Self::Store(other),
        }
    }
}

fn join(errors: &[WorkflowError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
