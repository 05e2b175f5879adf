//! Sprints and their one-way status machine.

use super::{ParseSprintStatusError, SprintId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sprint lifecycle status. `Active -> Completed` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SprintStatus {
    /// Tasks are being worked on.
    Active,
    /// Closed by a finalize operation.
    Completed,
}

impl SprintStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SprintStatus {
    type Error = ParseSprintStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "Active" => Ok(Self::Active),
            "Completed" => Ok(Self::Completed),
            _ => Err(ParseSprintStatusError(value.to_owned())),
        }
    }
}

/// A stored sprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    /// Internal identifier.
    pub id: SprintId,
    /// Day the sprint was opened.
    pub start_date: NaiveDate,
    /// Day the sprint was closed, once completed.
    pub end_date: Option<NaiveDate>,
    /// Current status.
    pub status: SprintStatus,
    /// The user who opened the sprint.
    pub created_by: UserId,
}

impl Sprint {
    /// Returns `true` while the sprint is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SprintStatus::Active
    }
}

/// A sprint that has not been stored yet. New sprints are always active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSprint {
    /// Day the sprint opens.
    pub start_date: NaiveDate,
    /// The opening user.
    pub created_by: UserId,
}

impl NewSprint {
    /// Creates an active sprint draft.
    #[must_use]
    pub const fn active(created_by: UserId, start_date: NaiveDate) -> Self {
        Self {
            start_date,
            created_by,
        }
    }
}
