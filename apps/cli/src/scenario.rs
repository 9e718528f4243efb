//! Scenario files: templates, instances and votes replayed through the engine.
//!
//! ```toml
//! [[template]]
//! key = "purchase"
//! name = "Purchase request"
//!
//! [[template.steps]]
//! name = "managers"
//! approvers = ["ann", "bob", "cid"]
//!
//! [[instance]]
//! key = "laptop"
//! template = "purchase"
//!
//! [[vote]]
//! instance = "laptop"
//! approver = "ann"
//! approve = true
//! ```

use std::collections::HashMap;

use anyhow::{Context, bail};
use quorum_core::{ApproverId, InstanceId, TemplateId};
use quorum_engine::{ApprovalEngine, ErrorKind};
use quorum_execution::{Outcome, Vote, WorkflowInstance};
use quorum_workflow::{StepDraft, TemplateDraft};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A parsed scenario file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default, rename = "template")]
    pub templates: Vec<TemplateEntry>,
    #[serde(default, rename = "instance")]
    pub instances: Vec<InstanceEntry>,
    #[serde(default, rename = "vote")]
    pub votes: Vec<VoteEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateEntry {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "publish_by_default")]
    pub publish: bool,
    #[serde(default)]
    pub steps: Vec<StepEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepEntry {
    pub name: String,
    #[serde(default)]
    pub approvers: Vec<ApproverId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceEntry {
    pub key: String,
    pub template: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoteEntry {
    pub instance: String,
    pub approver: ApproverId,
    pub approve: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

const fn publish_by_default() -> bool {
    true
}

impl TemplateEntry {
    fn draft(&self) -> TemplateDraft {
        TemplateDraft {
            name: self.name.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            steps: self
                .steps
                .iter()
                .map(|s| StepDraft::new(s.name.clone(), s.approvers.iter().cloned()))
                .collect(),
        }
    }
}

impl VoteEntry {
    fn vote(&self) -> Vote {
        Vote {
            approver: self.approver.clone(),
            approve: self.approve,
            reason: self.reason.clone(),
        }
    }
}

impl Scenario {
    /// Parse scenario TOML.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("parsing scenario")
    }
}

/// How one vote went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum VoteResult {
    /// The vote was stored.
    Recorded {
        /// Decision for the step voted on.
        outcome: Outcome,
    },
    /// The engine refused the vote.
    Refused {
        /// Error classification.
        kind: ErrorKind,
        /// Error message.
        error: String,
    },
}

/// One replayed vote.
#[derive(Debug, Clone, Serialize)]
pub struct VoteLine {
    pub instance: String,
    pub approver: ApproverId,
    pub approve: bool,
    #[serde(flatten)]
    pub result: VoteResult,
}

/// Final state of one scenario instance.
#[derive(Debug, Clone, Serialize)]
pub struct InstanceLine {
    pub key: String,
    pub instance: WorkflowInstance,
}

/// Everything a replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub votes: Vec<VoteLine>,
    pub instances: Vec<InstanceLine>,
}

impl Report {
    /// Votes the engine refused.
    pub fn refused(&self) -> usize {
        self.votes
            .iter()
            .filter(|v| matches!(v.result, VoteResult::Refused { .. }))
            .count()
    }
}

/// Replay `scenario` against `engine`.
///
/// Templates and instances must be created successfully; a refused vote is
/// recorded in the report and the replay carries on.
pub async fn replay(engine: &ApprovalEngine, scenario: &Scenario) -> anyhow::Result<Report> {
    let mut templates: HashMap<&str, TemplateId> = HashMap::new();
    for entry in &scenario.templates {
        if templates.contains_key(entry.key.as_str()) {
            bail!("duplicate template key '{}'", entry.key);
        }
        let template = engine
            .create_template(entry.draft())
            .await
            .with_context(|| format!("creating template '{}'", entry.key))?;
        if entry.publish {
            engine
                .publish_template(template.id)
                .await
                .with_context(|| format!("publishing template '{}'", entry.key))?;
        }
        templates.insert(&entry.key, template.id);
    }

    let mut instances: HashMap<&str, InstanceId> = HashMap::new();
    let mut order = Vec::with_capacity(scenario.instances.len());
    for entry in &scenario.instances {
        if instances.contains_key(entry.key.as_str()) {
            bail!("duplicate instance key '{}'", entry.key);
        }
        let Some(&template_id) = templates.get(entry.template.as_str()) else {
            bail!(
                "instance '{}' refers to unknown template '{}'",
                entry.key,
                entry.template
            );
        };
        let instance = engine
            .create_instance(template_id)
            .await
            .with_context(|| format!("creating instance '{}'", entry.key))?;
        instances.insert(&entry.key, instance.id);
        order.push((entry.key.clone(), instance.id));
    }

    let mut votes = Vec::with_capacity(scenario.votes.len());
    for entry in &scenario.votes {
        let Some(&id) = instances.get(entry.instance.as_str()) else {
            bail!("vote refers to unknown instance '{}'", entry.instance);
        };
        let result = match engine.record_vote(id, entry.vote()).await {
            Ok(receipt) => {
                info!(instance = %entry.instance, approver = %entry.approver, outcome = %receipt.outcome, "vote recorded");
                VoteResult::Recorded {
                    outcome: receipt.outcome,
                }
            }
            Err(err) => {
                warn!(instance = %entry.instance, approver = %entry.approver, error = %err, "vote refused");
                VoteResult::Refused {
                    kind: err.kind(),
                    error: err.to_string(),
                }
            }
        };
        votes.push(VoteLine {
            instance: entry.instance.clone(),
            approver: entry.approver.clone(),
            approve: entry.approve,
            result,
        });
    }

    let mut finals = Vec::with_capacity(order.len());
    for (key, id) in order {
        let instance = engine.get_instance(id).await?;
        finals.push(InstanceLine { key, instance });
    }

    Ok(Report {
        votes,
        instances: finals,
    })
}
