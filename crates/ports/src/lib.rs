#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Quorum Ports
//!
//! Persistence interface traits (ports) for the Quorum approval engine.
//!
//! The engine never talks to a storage engine directly. Drivers implement
//! these traits and are handed to the engine behind `Arc<dyn Trait>`:
//!
//! - [`TemplateRepo`] -- workflow templates
//! - [`InstanceRepo`] -- workflow instances
//!
//! Every stored value carries a version counter ([`Versioned`]). Updates go
//! through `compare_and_swap`, which only writes if the caller saw the latest
//! version. That is the single concurrency primitive the engine relies on.
//!
//! Enable the `mock` feature to get `MockTemplateRepo` / `MockInstanceRepo`.

pub mod error;
pub mod instance;
pub mod template;
pub mod versioned;

pub use error::{Entity, PortsError};
pub use instance::InstanceRepo;
pub use template::TemplateRepo;
pub use versioned::Versioned;

#[cfg(feature = "mock")]
pub use instance::MockInstanceRepo;
#[cfg(feature = "mock")]
pub use template::MockTemplateRepo;
