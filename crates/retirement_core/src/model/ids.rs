//! Identifiers for simulation entities.
//!
//! Accounts are user-named in the plan input (a spreadsheet-like id such
//! as `"brokerage-1"`), so `AccountId` wraps a `String` rather than the
//! numeric handles used for ephemeral in-run entities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for an [`Account`](super::Account), stable across the run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        AccountId(s.to_string())
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        AccountId(s)
    }
}

/// Which member of the household an entity belongs to or describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonId {
    Primary,
    Spouse,
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonId::Primary => write!(f, "primary"),
            PersonId::Spouse => write!(f, "spouse"),
        }
    }
}
