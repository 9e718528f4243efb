//! Comprehensive template validation that collects all errors.

use crate::draft::TemplateDraft;
use crate::error::WorkflowError;

/// Validate a template draft comprehensively.
///
/// Every problem found is reported, in step order, so an administrator can fix
/// them all at once. An empty result means the draft may be stored.
#[must_use]
pub fn validate_template(draft: &TemplateDraft) -> Vec<WorkflowError> {
    let mut errors = Vec::new();

    if draft.name.trim().is_empty() {
        errors.push(WorkflowError::EmptyName);
    }

    if draft.steps.is_empty() {
        errors.push(WorkflowError::NoSteps);
        return errors;
    }

    for (index, step) in draft.steps.iter().enumerate() {
        if step.name.trim().is_empty() {
            errors.push(WorkflowError::EmptyStepName { index });
        }
        if step.approvers.is_empty() {
            errors.push(WorkflowError::EmptyApproverSet {
                index,
                name: step.name.clone(),
            });
        }
    }

    errors
}
