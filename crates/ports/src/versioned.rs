//! Version-stamped values returned by the stores.

use serde::{Deserialize, Serialize};

/// A stored value together with the version it was read at.
///
/// Versions start at 1 on creation and grow by one on every successful
/// compare-and-swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    /// The stored value.
    pub value: T,
    /// Version counter at read time.
    pub version: u64,
}

impl<T> Versioned<T> {
    /// Version assigned by `create`.
    pub const INITIAL: u64 = 1;

    /// Wrap `value` read at `version`.
    pub const fn new(value: T, version: u64) -> Self {
        Self { value, version }
    }

    /// Drop the version.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Map the value, keeping the version.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Versioned<U> {
        Versioned {
            value: f(self.value),
            version: self.version,
        }
    }
}
