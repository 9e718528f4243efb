//! Fluent builder for constructing and validating template drafts.

use quorum_core::ApproverId;

use crate::draft::{StepDraft, TemplateDraft};
use crate::error::WorkflowError;
use crate::validate::validate_template;

/// A builder that accumulates steps and metadata, then validates and produces a
/// [`TemplateDraft`].
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    draft: TemplateDraft,
}

impl TemplateBuilder {
    /// Start building a template with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            draft: TemplateDraft::new(name),
        }
    }

    /// Set the version label.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.draft.version = version.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.draft.description = desc.into();
        self
    }

    /// Append a step.
    #[must_use]
    pub fn step(
        mut self,
        name: impl Into<String>,
        approvers: impl IntoIterator<Item = ApproverId>,
    ) -> Self {
        self.draft.steps.push(StepDraft::new(name, approvers));
        self
    }

    /// Consume the builder, validate the draft, and return it.
    pub fn build(self) -> Result<TemplateDraft, Vec<WorkflowError>> {
        let errors = validate_template(&self.draft);
        if errors.is_empty() {
            Ok(self.draft)
        } else {
            Err(errors)
        }
    }
}
