#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Quorum Execution
//!
//! Runtime state of approval workflow instances.
//!
//! This crate models instance-level concepts and contains no I/O. It defines:
//!
//! - [`WorkflowInstance`] and [`StepInstance`]: the persistent progress records
//! - [`InstanceStatus`]: the overall Pending / Approved / Rejected status
//! - [`decide`] and [`Tally`]: the quorum aggregator (pure, side-effect free)
//! - [`Vote`]: one approver's ballot
//! - Phase transitions validated by the [`transition`] module
//!
//! Applying a vote with [`WorkflowInstance::record_vote`] mutates only the value
//! in hand; persisting it is the caller's job.

pub mod error;
pub mod instance;
pub mod quorum;
pub mod status;
pub mod step;
pub mod transition;
pub mod vote;

pub use error::ExecutionError;
pub use instance::WorkflowInstance;
pub use quorum::{Outcome, Tally, decide};
pub use status::InstanceStatus;
pub use step::StepInstance;
pub use transition::InstancePhase;
pub use vote::Vote;
