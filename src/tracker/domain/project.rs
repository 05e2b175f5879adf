//! Projects own backlogs of tasks.

use super::{ProjectId, TrackerDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Longest project name or task title the store accepts, in characters.
pub const MAX_NAME_CHARS: usize = 255;

/// A stored project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Internal identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// The user who created (and owns) the project.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A project that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Project name, trimmed, non-empty and at most [`MAX_NAME_CHARS`] long.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Creating user.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewProject {
    /// Validates and creates a project draft.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyProjectName`] when `name` is blank
    /// or [`TrackerDomainError::TooLong`] when it exceeds [`MAX_NAME_CHARS`].
    pub fn new(
        name: &str,
        description: impl Into<String>,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Result<Self, TrackerDomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TrackerDomainError::EmptyProjectName);
        }
        if trimmed.chars().count() > MAX_NAME_CHARS {
            return Err(TrackerDomainError::TooLong {
                field: "project name",
                max: MAX_NAME_CHARS,
            });
        }
        Ok(Self {
            name: trimmed.to_owned(),
            description: description.into(),
            created_by,
            created_at: clock.utc(),
        })
    }
}

impl Project {
    /// Materialises a freshly inserted project.
    #[must_use]
    pub fn from_new(id: ProjectId, project: NewProject) -> Self {
        Self {
            id,
            name: project.name,
            description: project.description,
            created_by: project.created_by,
            created_at: project.created_at,
        }
    }
}
