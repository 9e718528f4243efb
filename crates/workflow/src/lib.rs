#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Quorum Workflow
//!
//! Reusable approval workflow templates for the Quorum engine.
//!
//! A template is an ordered sequence of approval steps, each with a named set of
//! eligible approvers. This crate provides:
//!
//! - [`TemplateDraft`] and [`StepDraft`], the caller-supplied input
//! - [`TemplateBuilder`] for fluent, validated construction of a draft
//! - [`validate_template`] for multi-error validation
//! - [`WorkflowTemplate`] and [`StepTemplate`], the stored form with assigned ids
//! - [`TemplateStatus`] and the lifecycle rules in [`transition`]

pub mod builder;
pub mod definition;
pub mod draft;
pub mod error;
pub mod status;
pub mod transition;
pub mod validate;

pub use builder::TemplateBuilder;
pub use definition::{StepTemplate, WorkflowTemplate};
pub use draft::{StepDraft, TemplateDraft};
pub use error::WorkflowError;
pub use status::TemplateStatus;
pub use validate::validate_template;
