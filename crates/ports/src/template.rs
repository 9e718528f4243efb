//! Template repository port.

use async_trait::async_trait;
use quorum_core::TemplateId;
use quorum_workflow::WorkflowTemplate;

use crate::error::PortsError;
use crate::versioned::Versioned;

/// Persistence interface for workflow templates.
///
/// All methods are async and object-safe. Implementations must be `Send + Sync`
/// so the trait object can be shared across Tokio tasks.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait TemplateRepo: Send + Sync {
    /// Store a new template.
    ///
    /// The store assigns the id (overwriting `template.id`) from an ascending
    /// sequence and returns the stored value at [`Versioned::INITIAL`].
    async fn create(
        &self,
        template: WorkflowTemplate,
    ) -> Result<Versioned<WorkflowTemplate>, PortsError>;

    /// Get a template and its current version. Fails with `NotFound`.
    async fn get(&self, id: TemplateId) -> Result<Versioned<WorkflowTemplate>, PortsError>;

    /// Replace the template if its stored version still equals `expected_version`.
    ///
    /// Returns `Ok(false)` when another writer got there first. Fails with
    /// `NotFound` if the template does not exist.
    async fn compare_and_swap(
        &self,
        id: TemplateId,
        expected_version: u64,
        template: WorkflowTemplate,
    ) -> Result<bool, PortsError>;

    /// Up to `limit` templates, skipping the first `offset`, in ascending id order.
    async fn list(&self, offset: usize, limit: usize)
    -> Result<Vec<WorkflowTemplate>, PortsError>;

    /// Remove the template if its stored version still equals `expected_version`.
    ///
    /// Returns `Ok(false)` on a version mismatch. Fails with `NotFound`.
    async fn delete(&self, id: TemplateId, expected_version: u64) -> Result<bool, PortsError>;
}
