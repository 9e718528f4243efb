//! The approval workflow engine.
//!
//! Every mutating operation follows the same shape: load the versioned record,
//! apply the pure domain transition to a copy, then persist it with one
//! compare-and-swap. Losing the swap restarts the operation from the load.

use std::sync::Arc;

use quorum_core::{Clock, InstanceId, SystemClock, TemplateId};
use quorum_execution::{InstancePhase, Outcome, StepInstance, Vote, WorkflowInstance};
use quorum_ports::{Entity, InstanceRepo, TemplateRepo, Versioned};
use quorum_workflow::{
    StepTemplate, TemplateDraft, TemplateStatus, WorkflowError, WorkflowTemplate,
    validate_template,
};
use tracing::{debug, info, instrument};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::query::{Page, VoteReceipt};
use crate::retry::{ConflictBackoff, swapped};

/// Orchestrates templates and instances over the persistence ports.
///
/// Cheap to clone; clones share the same stores and clock.
#[derive(Clone)]
pub struct ApprovalEngine {
    templates: Arc<dyn TemplateRepo>,
    instances: Arc<dyn InstanceRepo>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl std::fmt::Debug for ApprovalEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApprovalEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApprovalEngine {
    /// An engine over the given stores with the system clock and default config.
    pub fn new(templates: Arc<dyn TemplateRepo>, instances: Arc<dyn InstanceRepo>) -> Self {
        Self {
            templates,
            instances,
            clock: Arc::new(SystemClock),
            config: EngineConfig::default(),
        }
    }

    /// Replace the clock used for timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Templates ───────────────────────────────────────────────────────

    /// Validate and store a new Draft template.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_template(
        &self,
        draft: TemplateDraft,
    ) -> Result<WorkflowTemplate, EngineError> {
        let template = WorkflowTemplate::from_draft(TemplateId::new(0), draft, self.clock.now())?;
        let stored = self.templates.create(template).await?;
        info!(template_id = %stored.value.id, steps = stored.value.step_count(), "template created");
        Ok(stored.value)
    }

    /// Replace the contents of a Draft template.
    #[instrument(skip(self, draft), fields(template_id = %id))]
    pub async fn update_template(
        &self,
        id: TemplateId,
        draft: TemplateDraft,
    ) -> Result<WorkflowTemplate, EngineError> {
        let errors = validate_template(&draft);
        if !errors.is_empty() {
            return Err(EngineError::Validation(errors));
        }

        let mut backoff = self.backoff(Entity::Template, id.get());
        loop {
            let Versioned { mut value, version } = self.templates.get(id).await?;
            value.revise(draft.clone(), self.clock.now())?;
            if swapped(self.templates.compare_and_swap(id, version, value.clone()).await)? {
                info!("template updated");
                return Ok(value);
            }
            backoff.lost().await?;
        }
    }

    /// Make a template instantiable. Publishing twice is a no-op.
    #[instrument(skip(self), fields(template_id = %id))]
    pub async fn publish_template(&self, id: TemplateId) -> Result<WorkflowTemplate, EngineError> {
        self.change_status(id, TemplateStatus::Published).await
    }

    /// Stop new instances of a template. Running instances are unaffected.
    #[instrument(skip(self), fields(template_id = %id))]
    pub async fn disable_template(&self, id: TemplateId) -> Result<WorkflowTemplate, EngineError> {
        self.change_status(id, TemplateStatus::Disabled).await
    }

    async fn change_status(
        &self,
        id: TemplateId,
        target: TemplateStatus,
    ) -> Result<WorkflowTemplate, EngineError> {
        let mut backoff = self.backoff(Entity::Template, id.get());
        loop {
            let Versioned { mut value, version } = self.templates.get(id).await?;
            let now = self.clock.now();
            let changed = match target {
                TemplateStatus::Published => value.publish(now)?,
                TemplateStatus::Disabled => value.disable(now)?,
                TemplateStatus::Draft => {
                    return Err(EngineError::Template(WorkflowError::InvalidTransition {
                        from: value.status,
                        to: target,
                    }));
                }
            };
            if !changed {
                debug!(status = %value.status, "template status unchanged");
                return Ok(value);
            }
            if swapped(self.templates.compare_and_swap(id, version, value.clone()).await)? {
                info!(status = %value.status, "template status changed");
                return Ok(value);
            }
            backoff.lost().await?;
        }
    }

    /// Remove a Draft template.
    #[instrument(skip(self), fields(template_id = %id))]
    pub async fn delete_template(&self, id: TemplateId) -> Result<(), EngineError> {
        let mut backoff = self.backoff(Entity::Template, id.get());
        loop {
            let Versioned { value, version } = self.templates.get(id).await?;
            if !value.status.is_editable() {
                return Err(EngineError::TemplateNotDeletable {
                    id,
                    status: value.status,
                });
            }
            if swapped(self.templates.delete(id, version).await)? {
                info!("template deleted");
                return Ok(());
            }
            backoff.lost().await?;
        }
    }

    /// Fetch a template.
    #[instrument(skip(self), fields(template_id = %id))]
    pub async fn get_template(&self, id: TemplateId) -> Result<WorkflowTemplate, EngineError> {
        Ok(self.templates.get(id).await?.value)
    }

    /// Templates in ascending id order.
    #[instrument(skip(self))]
    pub async fn list_templates(&self, page: Page) -> Result<Vec<WorkflowTemplate>, EngineError> {
        Ok(self.templates.list(page.offset, page.limit).await?)
    }

    // ── Instances ───────────────────────────────────────────────────────

    /// Start an instance of a Published template at step 0.
    #[instrument(skip(self), fields(template_id = %template_id))]
    pub async fn create_instance(
        &self,
        template_id: TemplateId,
    ) -> Result<WorkflowInstance, EngineError> {
        let template = self.templates.get(template_id).await?.value;
        if !template.status.is_instantiable() {
            return Err(EngineError::TemplateNotPublished {
                id: template_id,
                status: template.status,
            });
        }
        let instance = WorkflowInstance::new(InstanceId::new(0), template_id, self.clock.now());
        let stored = self.instances.create(instance).await?;
        info!(instance_id = %stored.value.id, "instance created");
        Ok(stored.value)
    }

    /// Cast `vote` on the open step of an instance and advance it.
    ///
    /// A lost compare-and-swap reloads the instance and reapplies the vote, so
    /// concurrent votes from different approvers all land.
    #[instrument(skip(self, vote), fields(instance_id = %id, approver = %vote.approver))]
    pub async fn record_vote(
        &self,
        id: InstanceId,
        vote: Vote,
    ) -> Result<VoteReceipt, EngineError> {
        let mut backoff = self.backoff(Entity::Instance, id.get());
        loop {
            let Versioned {
                value: mut instance,
                version,
            } = self.instances.get(id).await?;
            let template = self.templates.get(instance.template_id).await?.value;

            let before = instance.phase();
            let outcome = instance.record_vote(&template, &vote, self.clock.now())?;

            if swapped(
                self.instances
                    .compare_and_swap(id, version, instance.clone())
                    .await,
            )? {
                log_progress(before, instance.phase(), outcome);
                return Ok(VoteReceipt {
                    instance,
                    outcome,
                    attempts: backoff.attempts(),
                });
            }
            backoff.lost().await?;
        }
    }

    /// Fetch an instance.
    #[instrument(skip(self), fields(instance_id = %id))]
    pub async fn get_instance(&self, id: InstanceId) -> Result<WorkflowInstance, EngineError> {
        Ok(self.instances.get(id).await?.value)
    }

    /// Every instance in ascending id order.
    #[instrument(skip(self))]
    pub async fn list_instances(&self) -> Result<Vec<WorkflowInstance>, EngineError> {
        Ok(self.instances.list().await?)
    }

    /// Instances of one template in ascending id order.
    #[instrument(skip(self), fields(template_id = %template_id))]
    pub async fn list_instances_for_template(
        &self,
        template_id: TemplateId,
    ) -> Result<Vec<WorkflowInstance>, EngineError> {
        self.templates.get(template_id).await?;
        Ok(self.instances.list_by_template(template_id).await?)
    }

    /// The vote record of the open step.
    ///
    /// Fails with `NotFound` until the step receives its first vote, and for
    /// fully approved instances. A rejected instance returns the rejecting step.
    #[instrument(skip(self), fields(instance_id = %id))]
    pub async fn get_current_step(&self, id: InstanceId) -> Result<StepInstance, EngineError> {
        let instance = self.instances.get(id).await?.value;
        instance
            .current_step()
            .cloned()
            .ok_or(EngineError::StepNotFound {
                instance_id: id,
                step_index: instance.current_step_index,
            })
    }

    /// The template step after the open one.
    #[instrument(skip(self), fields(instance_id = %id))]
    pub async fn get_next_step(&self, id: InstanceId) -> Result<StepTemplate, EngineError> {
        let instance = self.instances.get(id).await?.value;
        if instance.done {
            return Err(EngineError::NoNextStep { instance_id: id });
        }
        let template = self.templates.get(instance.template_id).await?.value;
        instance
            .next_step(&template)
            .cloned()
            .ok_or(EngineError::NoNextStep { instance_id: id })
    }

    /// Remove an instance that has not finished.
    #[instrument(skip(self), fields(instance_id = %id))]
    pub async fn delete_instance(&self, id: InstanceId) -> Result<(), EngineError> {
        let mut backoff = self.backoff(Entity::Instance, id.get());
        loop {
            let Versioned { value, version } = self.instances.get(id).await?;
            if value.done {
                return Err(EngineError::InstanceDone {
                    id,
                    status: value.overall_status,
                });
            }
            if swapped(self.instances.delete(id, version).await)? {
                info!("instance deleted");
                return Ok(());
            }
            backoff.lost().await?;
        }
    }

    fn backoff(&self, entity: Entity, id: u64) -> ConflictBackoff {
        ConflictBackoff::new(self.config.retry, entity, id)
    }
}

fn log_progress(before: InstancePhase, after: InstancePhase, outcome: Outcome) {
    match after {
        _ if before == after => debug!(%outcome, "vote recorded"),
        InstancePhase::Pending { step_index } => info!(step_index, "step approved, instance advanced"),
        InstancePhase::Approved => info!("instance approved"),
        InstancePhase::Rejected => info!("instance rejected"),
    }
}
