//! Lifecycle transition validation for templates.

use crate::error::WorkflowError;
use crate::status::TemplateStatus;

/// Returns `true` if the template-level transition from `from` to `to` is valid.
///
/// Staying in the same status is not a transition; callers treat repeated
/// publish/disable requests as no-ops before asking.
#[must_use]
pub fn can_transition_template(from: TemplateStatus, to: TemplateStatus) -> bool {
    matches!(
        (from, to),
        (TemplateStatus::Draft, TemplateStatus::Published)
            | (TemplateStatus::Draft, TemplateStatus::Disabled)
            | (TemplateStatus::Published, TemplateStatus::Disabled)
    )
}

/// Validate a template-level transition, returning an error if invalid.
pub fn validate_template_transition(
    from: TemplateStatus,
    to: TemplateStatus,
) -> Result<(), WorkflowError> {
    if can_transition_template(from, to) {
        Ok(())
    } else {
        Err(WorkflowError::InvalidTransition { from, to })
    }
}
