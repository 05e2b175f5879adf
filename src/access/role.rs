//! Organisation roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Role held by a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Works on sprint tasks.
    Developer,
    /// Owns projects and their backlogs.
    ProductOwner,
    /// Manages users; expected to be unique at steady state.
    #[serde(rename = "CEO")]
    Ceo,
}

impl Role {
    /// Every role, lowest privilege first.
    pub const ALL: [Self; 3] = [Self::Developer, Self::ProductOwner, Self::Ceo];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Developer => "Developer",
            Self::ProductOwner => "ProductOwner",
            Self::Ceo => "CEO",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "Developer" => Ok(Self::Developer),
            "ProductOwner" => Ok(Self::ProductOwner),
            "CEO" => Ok(Self::Ceo),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Error returned while parsing a role from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
