//! Unique identifiers for Quorum entities.
//!
//! Templates, instances and steps are identified by sequence numbers assigned by
//! the store that owns them. Each identifier is a distinct newtype so a
//! [`TemplateId`] can never be passed where an [`InstanceId`] is expected.
//!
//! All ID types are `Copy` and support:
//! - `new(u64)` / `get()` for raw access
//! - Ordering by the raw value (ascending id == creation order)
//! - `Display` / `FromStr` as the bare decimal number
//! - Transparent serde (serializes as a JSON number)

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an identifier from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id '{input}': {source}")]
pub struct IdParseError {
    /// Which identifier type was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub input: String,
    /// Underlying integer parse failure.
    #[source]
    pub source: ParseIntError,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw sequence number.
            #[inline]
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the raw sequence number.
            #[inline]
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self).map_err(|source| IdParseError {
                    kind: $kind,
                    input: s.to_owned(),
                    source,
                })
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

define_id!(
    /// Identifier of a workflow template.
    TemplateId,
    "template"
);
define_id!(
    /// Identifier of a running or finished workflow instance.
    InstanceId,
    "instance"
);
define_id!(
    /// Identifier of a step within its template (1-based, in step order).
    StepId,
    "step"
);
