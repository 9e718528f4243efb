use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum allowed length for an [`ApproverId`], in bytes.
const APPROVER_ID_MAX_LEN: usize = 256;

/// Errors from constructing an [`ApproverId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApproverIdError {
    /// The input was empty or contained only whitespace.
    #[error("approver id cannot be empty or whitespace")]
    Empty,
    /// The input exceeds [`APPROVER_ID_MAX_LEN`] bytes.
    #[error("approver id exceeds maximum length of {APPROVER_ID_MAX_LEN} bytes")]
    TooLong,
}

/// Identity of a voter, as resolved by the authorization layer.
///
/// The engine treats the value as an opaque key: it is compared, ordered and
/// stored, never parsed. The only rules are that it is not blank and not longer
/// than 256 bytes. The string is kept exactly as given (no trimming or case
/// folding) so that it matches whatever the identity provider issued.
///
/// # Examples
///
/// ```
/// use quorum_core::ApproverId;
///
/// let id: ApproverId = "user:42".parse().unwrap();
/// assert_eq!(id.as_str(), "user:42");
/// assert!(ApproverId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApproverId(String);

impl ApproverId {
    /// Create a new `ApproverId`, validating the input.
    pub fn new(raw: impl Into<String>) -> Result<Self, ApproverIdError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ApproverIdError::Empty);
        }
        if raw.len() > APPROVER_ID_MAX_LEN {
            return Err(ApproverIdError::TooLong);
        }
        Ok(Self(raw))
    }

    /// Return the inner string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApproverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ApproverId {
    type Err = ApproverIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ApproverId {
    type Error = ApproverIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ApproverId {
    type Error = ApproverIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApproverId> for String {
    fn from(id: ApproverId) -> Self {
        id.0
    }
}

impl AsRef<str> for ApproverId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ApproverId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ApproverId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
