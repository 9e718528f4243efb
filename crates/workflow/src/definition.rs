//! Stored template types.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use quorum_core::{ApproverId, StepId, TemplateId};
use serde::{Deserialize, Serialize};

use crate::draft::{StepDraft, TemplateDraft};
use crate::error::WorkflowError;
use crate::status::TemplateStatus;
use crate::transition::validate_template_transition;
use crate::validate::validate_template;

/// One approval step of a stored template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTemplate {
    /// Identifier, unique within the owning template.
    pub id: StepId,
    /// Step name.
    pub name: String,
    /// Everyone eligible to vote on this step.
    pub approvers: BTreeSet<ApproverId>,
    /// Mirrors the owning template's status.
    pub status: TemplateStatus,
}

impl StepTemplate {
    /// Returns `true` if `approver` may vote on this step.
    #[must_use]
    pub fn is_approver(&self, approver: &ApproverId) -> bool {
        self.approvers.contains(approver)
    }
}

/// A reusable, versioned approval workflow.
///
/// `steps` is fixed once the template leaves [`TemplateStatus::Draft`]; after
/// that only `status` changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    /// Store-assigned identifier.
    pub id: TemplateId,
    /// Human-readable name.
    pub name: String,
    /// Free-form version label.
    pub version: String,
    /// Longer description.
    pub description: String,
    /// Ordered approval steps.
    pub steps: Vec<StepTemplate>,
    /// Lifecycle status.
    pub status: TemplateStatus,
    /// When the template was first stored.
    pub created_at: DateTime<Utc>,
    /// When the template last changed.
    pub updated_at: DateTime<Utc>,
}

impl WorkflowTemplate {
    /// Build a Draft template from validated input.
    ///
    /// Step ids are assigned `1..=n` in step order. The id is a placeholder
    /// until the store assigns the real one.
    pub fn from_draft(
        id: TemplateId,
        draft: TemplateDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, Vec<WorkflowError>> {
        let errors = validate_template(&draft);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self {
            id,
            name: draft.name,
            version: draft.version,
            description: draft.description,
            steps: build_steps(draft.steps, TemplateStatus::Draft),
            status: TemplateStatus::Draft,
            created_at: now,
            updated_at: now,
        })
    }

    /// The step at `index`, if any.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&StepTemplate> {
        self.steps.get(index)
    }

    /// Number of steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if `index` addresses the final step.
    #[must_use]
    pub fn is_last_step(&self, index: usize) -> bool {
        index + 1 == self.steps.len()
    }

    /// Move to [`TemplateStatus::Published`].
    ///
    /// Returns `Ok(false)` without touching anything if already published.
    pub fn publish(&mut self, now: DateTime<Utc>) -> Result<bool, WorkflowError> {
        if self.status == TemplateStatus::Published {
            return Ok(false);
        }
        validate_template_transition(self.status, TemplateStatus::Published)?;
        if self.steps.is_empty() {
            return Err(WorkflowError::NoSteps);
        }
        self.set_status(TemplateStatus::Published, now);
        Ok(true)
    }

    /// Move to [`TemplateStatus::Disabled`].
    ///
    /// Returns `Ok(false)` without touching anything if already disabled.
    pub fn disable(&mut self, now: DateTime<Utc>) -> Result<bool, WorkflowError> {
        if self.status == TemplateStatus::Disabled {
            return Ok(false);
        }
        validate_template_transition(self.status, TemplateStatus::Disabled)?;
        self.set_status(TemplateStatus::Disabled, now);
        Ok(true)
    }

    /// Replace the editable contents of a Draft template.
    ///
    /// The draft must already have passed [`validate_template`]. Step ids are
    /// reassigned from 1.
    pub fn revise(&mut self, draft: TemplateDraft, now: DateTime<Utc>) -> Result<(), WorkflowError> {
        if !self.status.is_editable() {
            return Err(WorkflowError::NotEditable {
                status: self.status,
            });
        }
        self.name = draft.name;
        self.version = draft.version;
        self.description = draft.description;
        self.steps = build_steps(draft.steps, self.status);
        self.updated_at = now;
        Ok(())
    }

    fn set_status(&mut self, status: TemplateStatus, now: DateTime<Utc>) {
        self.status = status;
        for step in &mut self.steps {
            step.status = status;
        }
        self.updated_at = now;
    }
}

fn build_steps(steps: Vec<StepDraft>, status: TemplateStatus) -> Vec<StepTemplate> {
    steps
        .into_iter()
        .zip(1u64..)
        .map(|(step, seq)| StepTemplate {
            id: StepId::new(seq),
            name: step.name,
            approvers: step.approvers,
            status,
        })
        .collect()
}
