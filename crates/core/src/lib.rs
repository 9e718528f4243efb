#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Quorum Core
//!
//! Core types shared by every Quorum crate.
//!
//! ## Key Components
//!
//! - **Identifiers**: [`TemplateId`], [`InstanceId`], [`StepId`] (store-assigned,
//!   ordered sequence numbers) and [`ApproverId`] (an opaque identity string resolved
//!   by the authorization layer)
//! - **Clock**: [`Clock`] with [`SystemClock`] for production and [`FixedClock`] for tests
//!
//! ## Usage
//!
//! ```rust
//! use quorum_core::{ApproverId, Clock, FixedClock, TemplateId};
//!
//! let id = TemplateId::new(7);
//! assert_eq!(id.to_string(), "7");
//!
//! let alice = ApproverId::new("alice").unwrap();
//! assert_eq!(alice.as_str(), "alice");
//!
//! let clock = FixedClock::epoch();
//! assert_eq!(clock.now(), clock.now());
//! ```

pub mod approver;
pub mod clock;
pub mod id;

pub use approver::{ApproverId, ApproverIdError};
pub use clock::{Clock, FixedClock, SystemClock};
pub use id::{IdParseError, InstanceId, StepId, TemplateId};
