//! Instance repository port.

use async_trait::async_trait;
use quorum_core::{InstanceId, TemplateId};
use quorum_execution::WorkflowInstance;

use crate::error::PortsError;
use crate::versioned::Versioned;

/// Persistence interface for workflow instances.
///
/// Concurrent votes on one instance are serialized through
/// [`compare_and_swap`](Self::compare_and_swap); drivers must make it atomic.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait InstanceRepo: Send + Sync {
    /// Store a new instance, assigning its id. Returns it at [`Versioned::INITIAL`].
    async fn create(
        &self,
        instance: WorkflowInstance,
    ) -> Result<Versioned<WorkflowInstance>, PortsError>;

    /// Get an instance and its current version. Fails with `NotFound`.
    async fn get(&self, id: InstanceId) -> Result<Versioned<WorkflowInstance>, PortsError>;

    /// Replace the instance if its stored version still equals `expected_version`.
    ///
    /// Returns `Ok(false)` when another writer got there first. Fails with
    /// `NotFound` if the instance does not exist.
    async fn compare_and_swap(
        &self,
        id: InstanceId,
        expected_version: u64,
        instance: WorkflowInstance,
    ) -> Result<bool, PortsError>;

    /// Every instance, in ascending id order.
    async fn list(&self) -> Result<Vec<WorkflowInstance>, PortsError>;

    /// Instances created from `template_id`, in ascending id order.
    async fn list_by_template(
        &self,
        template_id: TemplateId,
    ) -> Result<Vec<WorkflowInstance>, PortsError>;

    /// Remove the instance if its stored version still equals `expected_version`.
    ///
    /// Returns `Ok(false)` on a version mismatch. Fails with `NotFound`.
    async fn delete(&self, id: InstanceId, expected_version: u64) -> Result<bool, PortsError>;
}
