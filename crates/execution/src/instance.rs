//! Workflow instance state and vote application.

use chrono::{DateTime, Utc};
use quorum_core::{InstanceId, TemplateId};
use quorum_workflow::{StepTemplate, WorkflowTemplate};
use serde::{Deserialize, Serialize};

use crate::error::ExecutionError;
use crate::quorum::{Outcome, decide};
use crate::status::InstanceStatus;
use crate::step::StepInstance;
use crate::transition::{InstancePhase, validate_instance_transition};
use crate::vote::Vote;

/// One running (or finished) execution of a template.
///
/// Invariants:
/// - `current_step_index <= step_count`, and equals `step_count` only once every
///   step approved.
/// - While active, `step_instances.len()` is `current_step_index` (no vote yet on
///   the open step) or `current_step_index + 1`.
/// - Once `done`, no vote changes anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowInstance {
    /// Store-assigned identifier.
    pub id: InstanceId,
    /// The Published template this instance was created from.
    pub template_id: TemplateId,
    /// Zero-based index of the open step.
    pub current_step_index: usize,
    /// One record per step that has received a vote, in step order.
    #[serde(default)]
    pub step_instances: Vec<StepInstance>,
    /// Set once the instance reached a terminal outcome.
    pub done: bool,
    /// Overall status.
    pub overall_status: InstanceStatus,
    /// When the instance was created.
    pub created_at: DateTime<Utc>,
    /// When the instance last changed.
    pub updated_at: DateTime<Utc>,
}

impl WorkflowInstance {
    /// A fresh instance at step 0 with no votes.
    #[must_use]
    pub fn new(id: InstanceId, template_id: TemplateId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            template_id,
            current_step_index: 0,
            step_instances: Vec::new(),
            done: false,
            overall_status: InstanceStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Where the instance stands.
    #[must_use]
    pub fn phase(&self) -> InstancePhase {
        match self.overall_status {
            InstanceStatus::Approved => InstancePhase::Approved,
            InstanceStatus::Rejected => InstancePhase::Rejected,
            InstanceStatus::Pending => InstancePhase::Pending {
                step_index: self.current_step_index,
            },
        }
    }

    /// The vote record of the open step, if it has received a vote.
    ///
    /// For a rejected instance this is the record of the step that rejected.
    #[must_use]
    pub fn current_step(&self) -> Option<&StepInstance> {
        self.step_instances.get(self.current_step_index)
    }

    /// The template step after the open one, if the instance is active and one exists.
    #[must_use]
    pub fn next_step<'t>(&self, template: &'t WorkflowTemplate) -> Option<&'t StepTemplate> {
        if self.done {
            return None;
        }
        template.step(self.current_step_index + 1)
    }

    /// Apply `vote` to the open step and advance the state machine.
    ///
    /// On error nothing is changed. On success the returned [`Outcome`] is the
    /// decision for the step the vote was cast on.
    pub fn record_vote(
        &mut self,
        template: &WorkflowTemplate,
        vote: &Vote,
        now: DateTime<Utc>,
    ) -> Result<Outcome, ExecutionError> {
        if self.done {
            return Err(ExecutionError::AlreadyDone {
                instance_id: self.id,
                status: self.overall_status,
            });
        }
        if template.id != self.template_id {
            return Err(ExecutionError::TemplateMismatch {
                expected: self.template_id,
                found: template.id,
            });
        }

        let index = self.current_step_index;
        let step = template
            .step(index)
            .ok_or(ExecutionError::StepOutOfRange {
                index,
                step_count: template.step_count(),
            })?;
        if !step.is_approver(&vote.approver) {
            return Err(ExecutionError::NotAnApprover {
                approver: vote.approver.clone(),
                step_index: index,
            });
        }

        let mut record = self.open_record(step, index)?;
        record.cast(vote);
        let outcome = decide(&step.approvers, &record.approvals);
        record.finished = outcome.is_decided();

        let from = self.phase();
        let to = match outcome {
            Outcome::Pending => from,
            Outcome::Rejected => InstancePhase::Rejected,
            Outcome::Approved if template.is_last_step(index) => InstancePhase::Approved,
            Outcome::Approved => InstancePhase::Pending {
                step_index: index + 1,
            },
        };
        if from != to {
            validate_instance_transition(from, to, template.step_count())?;
        }

        if index < self.step_instances.len() {
            self.step_instances[index] = record;
        } else {
            self.step_instances.push(record);
        }
        match to {
            InstancePhase::Pending { step_index } => self.current_step_index = step_index,
            InstancePhase::Approved => {
                self.current_step_index = template.step_count();
                self.overall_status = InstanceStatus::Approved;
                self.done = true;
            }
            InstancePhase::Rejected => {
                self.overall_status = InstanceStatus::Rejected;
                self.done = true;
            }
        }
        self.updated_at = now;
        Ok(outcome)
    }

    /// A working copy of the open step's record, or a fresh one on the step's first vote.
    fn open_record(&self, step: &StepTemplate, index: usize) -> Result<StepInstance, ExecutionError> {
        let records = self.step_instances.len();
        if records == index {
            return Ok(StepInstance::new(step.id));
        }
        if records != index + 1 {
            return Err(ExecutionError::InconsistentProgress { records, index });
        }

        let record = &self.step_instances[index];
        if record.step_id != step.id {
            return Err(ExecutionError::StepMismatch {
                record: index,
                expected: step.id,
                found: record.step_id,
            });
        }
        Ok(record.clone())
    }
}
