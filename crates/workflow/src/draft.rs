//! Caller-supplied template input.

use std::collections::BTreeSet;

use quorum_core::ApproverId;
use serde::{Deserialize, Serialize};

/// The editable part of a template, as submitted by an administrator.
///
/// Ids, status and timestamps are assigned when the draft is stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TemplateDraft {
    /// Human-readable name.
    pub name: String,
    /// Free-form version label, e.g. `"1.0.0"` or `"2024-Q3"`.
    #[serde(default)]
    pub version: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Ordered approval steps.
    #[serde(default)]
    pub steps: Vec<StepDraft>,
}

impl TemplateDraft {
    /// Create a draft with a name and no steps.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One approval step of a [`TemplateDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDraft {
    /// Step name, e.g. `"Manager review"`.
    pub name: String,
    /// Everyone eligible to vote on this step.
    #[serde(default)]
    pub approvers: BTreeSet<ApproverId>,
}

impl StepDraft {
    /// Create a step draft from a name and its approvers.
    #[must_use]
    pub fn new(name: impl Into<String>, approvers: impl IntoIterator<Item = ApproverId>) -> Self {
        Self {
            name: name.into(),
            approvers: approvers.into_iter().collect(),
        }
    }
}
