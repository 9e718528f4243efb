#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Quorum Memory Store Driver
//!
//! In-memory implementations of the [`TemplateRepo`] and [`InstanceRepo`] ports.
//!
//! Records live in a `BTreeMap` behind a `parking_lot::RwLock`, so listing is
//! naturally in ascending id order. Ids come from an atomic counter starting
//! at 1. Compare-and-swap checks and bumps the version under the write lock,
//! which makes it atomic with respect to every other writer.
//!
//! Suitable for tests, the scenario runner, and single-process deployments
//! where durability is not required.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use quorum_ports::{InstanceRepo, TemplateRepo};
//! use quorum_store_memory::{MemoryInstanceRepo, MemoryTemplateRepo};
//!
//! let templates: Arc<dyn TemplateRepo> = Arc::new(MemoryTemplateRepo::new());
//! let instances: Arc<dyn InstanceRepo> = Arc::new(MemoryInstanceRepo::new());
//! ```

mod table;

use async_trait::async_trait;
use quorum_core::{InstanceId, TemplateId};
use quorum_execution::WorkflowInstance;
use quorum_ports::{InstanceRepo, PortsError, TemplateRepo, Versioned};
use quorum_workflow::WorkflowTemplate;

use crate::table::Table;

/// In-memory template store.
#[derive(Debug, Default)]
pub struct MemoryTemplateRepo {
    table: Table<WorkflowTemplate>,
}

impl MemoryTemplateRepo {
    /// An empty store whose first id will be 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TemplateRepo for MemoryTemplateRepo {
    async fn create(
        &self,
        mut template: WorkflowTemplate,
    ) -> Result<Versioned<WorkflowTemplate>, PortsError> {
        Ok(self.table.insert(|raw| {
            template.id = TemplateId::new(raw);
            template
        }))
    }

    async fn get(&self, id: TemplateId) -> Result<Versioned<WorkflowTemplate>, PortsError> {
        self.table
            .get(id.get())
            .ok_or_else(|| PortsError::template_not_found(id))
    }

    async fn compare_and_swap(
        &self,
        id: TemplateId,
        expected_version: u64,
        mut template: WorkflowTemplate,
    ) -> Result<bool, PortsError> {
        template.id = id;
        self.table
            .swap(id.get(), expected_version, template)
            .ok_or_else(|| PortsError::template_not_found(id))
    }

    async fn list(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<WorkflowTemplate>, PortsError> {
        Ok(self.table.page(offset, limit, |_| true))
    }

    async fn delete(&self, id: TemplateId, expected_version: u64) -> Result<bool, PortsError> {
        self.table
            .remove(id.get(), expected_version)
            .ok_or_else(|| PortsError::template_not_found(id))
    }
}

/// In-memory instance store.
#[derive(Debug, Default)]
pub struct MemoryInstanceRepo {
    table: Table<WorkflowInstance>,
}

impl MemoryInstanceRepo {
    /// An empty store whose first id will be 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored version of an instance, if present.
    #[must_use]
    pub fn version_of(&self, id: InstanceId) -> Option<u64> {
        self.table.get(id.get()).map(|v| v.version)
    }
}

#[async_trait]
impl InstanceRepo for MemoryInstanceRepo {
    async fn create(
        &self,
        mut instance: WorkflowInstance,
    ) -> Result<Versioned<WorkflowInstance>, PortsError> {
        Ok(self.table.insert(|raw| {
            instance.id = InstanceId::new(raw);
            instance
        }))
    }

    async fn get(&self, id: InstanceId) -> Result<Versioned<WorkflowInstance>, PortsError> {
        self.table
            .get(id.get())
            .ok_or_else(|| PortsError::instance_not_found(id))
    }

    async fn compare_and_swap(
        &self,
        id: InstanceId,
        expected_version: u64,
        mut instance: WorkflowInstance,
    ) -> Result<bool, PortsError> {
        instance.id = id;
        self.table
            .swap(id.get(), expected_version, instance)
            .ok_or_else(|| PortsError::instance_not_found(id))
    }

    async fn list(&self) -> Result<Vec<WorkflowInstance>, PortsError> {
        Ok(self.table.page(0, usize::MAX, |_| true))
    }

    async fn list_by_template(
        &self,
        template_id: TemplateId,
    ) -> Result<Vec<WorkflowInstance>, PortsError> {
        Ok(self
            .table
            .page(0, usize::MAX, |i| i.template_id == template_id))
    }

    async fn delete(&self, id: InstanceId, expected_version: u64) -> Result<bool, PortsError> {
        self.table
            .remove(id.get(), expected_version)
            .ok_or_else(|| PortsError::instance_not_found(id))
    }
}
