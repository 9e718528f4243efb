#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Quorum Engine
//!
//! Orchestrates approval workflows on top of the persistence ports.
//!
//! [`ApprovalEngine`] owns every state change: it loads a record, computes the
//! new state in memory with the pure domain logic from `quorum-workflow` and
//! `quorum-execution`, and persists it with a single compare-and-swap. A lost
//! race reloads and recomputes, backing off per [`ConflictRetry`], until the
//! attempt budget runs out and [`EngineError::Conflict`] is returned.
//!
//! Because the store write is the only side effect, dropping a call future
//! at any await point leaves no partial state behind.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use quorum_core::ApproverId;
//! use quorum_engine::ApprovalEngine;
//! use quorum_execution::Vote;
//! use quorum_store_memory::{MemoryInstanceRepo, MemoryTemplateRepo};
//! use quorum_workflow::TemplateBuilder;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ApprovalEngine::new(
//!     Arc::new(MemoryTemplateRepo::new()),
//!     Arc::new(MemoryInstanceRepo::new()),
//! );
//! let draft = TemplateBuilder::new("expense")
//!     .step("manager", [ApproverId::new("ann")?])
//!     .build()
//!     .map_err(|e| format!("{e:?}"))?;
//! let template = engine.create_template(draft).await?;
//! engine.publish_template(template.id).await?;
//! let instance = engine.create_instance(template.id).await?;
//! let receipt = engine
//!     .record_vote(instance.id, Vote::approve(ApproverId::new("ann")?))
//!     .await?;
//! assert!(receipt.instance.done);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod query;
mod retry;

pub use config::{ConflictRetry, EngineConfig};
pub use engine::ApprovalEngine;
pub use error::{EngineError, ErrorKind};
pub use query::{Page, VoteReceipt};
