//! Template lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a template (and of each of its steps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStatus {
    /// Being authored; steps may still change. Cannot be instantiated.
    #[default]
    Draft,
    /// Frozen and instantiable.
    Published,
    /// Frozen and closed to new instances. Running instances keep going.
    Disabled,
}

impl TemplateStatus {
    /// Returns `true` if new instances may be created from a template in this status.
    #[must_use]
    pub fn is_instantiable(&self) -> bool {
        matches!(self, Self::Published)
    }

    /// Returns `true` if name, version, description and steps may still change.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns `true` once the step list is frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        matches!(self, Self::Published | Self::Disabled)
    }
}

impl std::fmt::Display for TemplateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}
