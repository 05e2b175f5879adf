//! Task aggregate root and its status lifecycle.

use super::{ParseTaskStatusError, ProjectId, SprintId, TaskId, TrackerDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// The only edges are `Backlog -> NotStarted -> InProgress -> InReview`,
/// followed by `InReview -> Completed` on approval or
/// `InReview -> InProgress` on rejection. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Waiting in a project backlog, not part of any sprint.
    Backlog,
    /// Planned into a sprint but not started.
    NotStarted,
    /// Being worked on.
    InProgress,
    /// Waiting for another user's review.
    InReview,
    /// Approved by a reviewer.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::NotStarted => "NotStarted",
            Self::InProgress => "InProgress",
            Self::InReview => "InReview",
            Self::Completed => "Completed",
        }
    }

    /// Returns `true` when `target` is a lifecycle edge from this status.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Backlog, Self::NotStarted)
                | (Self::NotStarted | Self::InReview, Self::InProgress)
                | (Self::InProgress, Self::InReview)
                | (Self::InReview, Self::Completed)
        )
    }

    /// Returns `true` when no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "Backlog" => Ok(Self::Backlog),
            "NotStarted" => Ok(Self::NotStarted),
            "InProgress" => Ok(Self::InProgress),
            "InReview" => Ok(Self::InReview),
            "Completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// A task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Owning project.
    pub project_id: ProjectId,
    /// Short title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Story-point estimate.
    pub story_points: Option<u32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a backlog task for `project_id`.
    #[must_use]
    pub fn backlog(
        project_id: ProjectId,
        title: impl Into<String>,
        story_points: u32,
        clock: &impl Clock,
    ) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            story_points: Some(story_points),
            created_at: clock.utc(),
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    sprint_id: Option<SprintId>,
    title: String,
    description: Option<String>,
    assignee: Option<UserId>,
    status: TaskStatus,
    story_points: Option<u32>,
    created_at: DateTime<Utc>,
    reviewed: bool,
    rejection_reason: Option<String>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Sprint the task is planned into, if any.
    pub sprint_id: Option<SprintId>,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Assigned user, if any.
    pub assignee: Option<UserId>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Story-point estimate.
    pub story_points: Option<u32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Whether a reviewer approved the task.
    pub reviewed: bool,
    /// Reason given by the last rejecting reviewer.
    pub rejection_reason: Option<String>,
}

impl Task {
    /// Materialises a freshly inserted task.
    #[must_use]
    pub fn from_new(id: TaskId, task: NewTask) -> Self {
        Self {
            id,
            project_id: task.project_id,
            sprint_id: None,
            title: task.title,
            description: task.description,
            assignee: None,
            status: TaskStatus::Backlog,
            story_points: task.story_points,
            created_at: task.created_at,
            reviewed: false,
            rejection_reason: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            sprint_id: data.sprint_id,
            title: data.title,
            description: data.description,
            assignee: data.assignee,
            status: data.status,
            story_points: data.story_points,
            created_at: data.created_at,
            reviewed: data.reviewed,
            rejection_reason: data.rejection_reason,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the sprint the task belongs to, if any.
    #[must_use]
    pub const fn sprint_id(&self) -> Option<SprintId> {
        self.sprint_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the assigned user, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the story-point estimate, if any.
    #[must_use]
    pub const fn story_points(&self) -> Option<u32> {
        self.story_points
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` once a reviewer has approved the task.
    #[must_use]
    pub const fn reviewed(&self) -> bool {
        self.reviewed
    }

    /// Returns the reason recorded by the last rejection, if any.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// Returns a stable menu label of the form `"<id>: <title>"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}: {}", self.id, self.title)
    }

    /// Returns `true` when `user_id` is the assignee.
    #[must_use]
    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.assignee == Some(user_id)
    }

    /// Moves a backlog task into sprint planning for `assignee`.
    ///
    /// The sprint itself is attached by the store when the planning unit of
    /// work commits.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::InvalidStatusTransition`] unless the task
    /// is in the backlog.
    pub fn plan_for(&mut self, assignee: UserId) -> Result<(), TrackerDomainError> {
        self.transition_to(TaskStatus::NotStarted)?;
        self.assignee = Some(assignee);
        Ok(())
    }

    /// Starts work on a planned task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::InvalidStatusTransition`] unless the task
    /// is `NotStarted`.
    pub fn start(&mut self) -> Result<(), TrackerDomainError> {
        if self.status != TaskStatus::NotStarted {
            return Err(self.invalid_transition(TaskStatus::InProgress));
        }
        self.transition_to(TaskStatus::InProgress)
    }

    /// Hands an in-progress task over to review.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::InvalidStatusTransition`] unless the task
    /// is `InProgress`.
    pub fn submit_for_review(&mut self) -> Result<(), TrackerDomainError> {
        self.transition_to(TaskStatus::InReview)
    }

    /// Approves a task under review.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::InvalidStatusTransition`] unless the task
    /// is `InReview`.
    pub fn approve(&mut self) -> Result<(), TrackerDomainError> {
        self.transition_to(TaskStatus::Completed)?;
        self.reviewed = true;
        Ok(())
    }

    /// Sends a task under review back to its assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyRejectionReason`] for a blank
    /// reason, or [`TrackerDomainError::InvalidStatusTransition`] unless the
    /// task is `InReview`.
    pub fn reject(&mut self, reason: &str) -> Result<(), TrackerDomainError> {
        let trimmed = reason.trim();
        if trimmed.is_empty() {
            return Err(TrackerDomainError::EmptyRejectionReason);
        }
        if self.status != TaskStatus::InReview {
            return Err(self.invalid_transition(TaskStatus::InProgress));
        }
        self.transition_to(TaskStatus::InProgress)?;
        self.rejection_reason = Some(trimmed.to_owned());
        Ok(())
    }

    /// Records the sprint chosen by the store during planning.
    pub(crate) const fn attach_to_sprint(&mut self, sprint_id: SprintId) {
        self.sprint_id = Some(sprint_id);
    }

    fn transition_to(&mut self, target: TaskStatus) -> Result<(), TrackerDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(self.invalid_transition(target));
        }
        self.status = target;
        Ok(())
    }

    const fn invalid_transition(&self, target: TaskStatus) -> TrackerDomainError {
        TrackerDomainError::InvalidStatusTransition {
            task_id: self.id,
            from: self.status,
            to: target,
        }
    }
}
