//! Entity store port: filter-by-field reads and atomic commits.

use super::unit_of_work::{CommitReceipt, UnitOfWork};
use crate::access::Role;
use crate::tracker::domain::{
    DailyReport, ExternalUserId, Project, ProjectId, RecordRef, Retrospective, Sprint, SprintId,
    SprintReview, SprintStatus, Task, TaskId, TaskStatus, User, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tracker store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Field filter for task lookups. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Owning project.
    pub project: Option<ProjectId>,
    /// Containing sprint.
    pub sprint: Option<SprintId>,
    /// Assigned user.
    pub assignee: Option<UserId>,
    /// Excludes tasks assigned to this user (unassigned tasks still match).
    pub not_assignee: Option<UserId>,
    /// Lifecycle status.
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    /// Creates a filter matching every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one project.
    #[must_use]
    pub const fn in_project(mut self, project: ProjectId) -> Self {
        self.project = Some(project);
        self
    }

    /// Restricts to one sprint.
    #[must_use]
    pub const fn in_sprint(mut self, sprint: SprintId) -> Self {
        self.sprint = Some(sprint);
        self
    }

    /// Restricts to tasks assigned to `user`.
    #[must_use]
    pub const fn assigned_to(mut self, user: UserId) -> Self {
        self.assignee = Some(user);
        self
    }

    /// Excludes tasks assigned to `user`.
    #[must_use]
    pub const fn not_assigned_to(mut self, user: UserId) -> Self {
        self.not_assignee = Some(user);
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns `true` when `task` satisfies every set field.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.project.is_none_or(|project| task.project_id() == project)
            && self.sprint.is_none_or(|sprint| task.sprint_id() == Some(sprint))
            && self.assignee.is_none_or(|user| task.assignee() == Some(user))
            && self.not_assignee.is_none_or(|user| task.assignee() != Some(user))
            && self.status.is_none_or(|status| task.status() == status)
    }
}

/// Field filter for project lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// Creating user.
    pub created_by: Option<UserId>,
}

impl ProjectFilter {
    /// Matches every project.
    #[must_use]
    pub const fn all() -> Self {
        Self { created_by: None }
    }

    /// Matches projects created by `user`.
    #[must_use]
    pub const fn created_by(user: UserId) -> Self {
        Self {
            created_by: Some(user),
        }
    }

    /// Returns `true` when `project` satisfies the filter.
    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        self.created_by
            .is_none_or(|user| project.created_by == user)
    }
}

/// Tracker persistence contract.
///
/// Reads return records ordered by ascending id unless stated otherwise.
/// All writes go through [`TrackerStore::commit`], which applies a
/// [`UnitOfWork`] atomically: either every change persists or none does.
#[async_trait]
pub trait TrackerStore: Send + Sync {
    /// Finds a user by internal id.
    async fn user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Finds a user by transport identity.
    async fn user_by_external_id(&self, external_id: ExternalUserId)
    -> StoreResult<Option<User>>;

    /// Returns users holding any of `roles`.
    async fn users_with_roles(&self, roles: &[Role]) -> StoreResult<Vec<User>>;

    /// Finds a project by id.
    async fn project(&self, id: ProjectId) -> StoreResult<Option<Project>>;

    /// Returns projects matching `filter`.
    async fn projects(&self, filter: ProjectFilter) -> StoreResult<Vec<Project>>;

    /// Finds a task by id.
    async fn task(&self, id: TaskId) -> StoreResult<Option<Task>>;

    /// Returns tasks matching `filter`.
    async fn tasks(&self, filter: TaskFilter) -> StoreResult<Vec<Task>>;

    /// Finds a sprint by id.
    async fn sprint(&self, id: SprintId) -> StoreResult<Option<Sprint>>;

    /// Returns sprints with the given status.
    async fn sprints_with_status(&self, status: SprintStatus) -> StoreResult<Vec<Sprint>>;

    /// Returns up to `limit` daily reports, newest report date first.
    async fn recent_daily_reports(&self, limit: usize) -> StoreResult<Vec<DailyReport>>;

    /// Returns up to `limit` sprint reviews, newest review date first.
    async fn recent_sprint_reviews(&self, limit: usize) -> StoreResult<Vec<SprintReview>>;

    /// Returns retrospectives recorded for `sprint`.
    async fn retrospectives(&self, sprint: SprintId) -> StoreResult<Vec<Retrospective>>;

    /// Applies every change in `unit` atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when a change references a missing
    /// row, [`StoreError::Conflict`] when a stored row no longer matches a
    /// change's expectation, or [`StoreError::Persistence`] when the backend
    /// fails. In every error case nothing is persisted.
    async fn commit(&self, unit: UnitOfWork) -> StoreResult<CommitReceipt>;
}

/// Errors returned by tracker store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A referenced record does not exist.
    #[error("{0} not found")]
    NotFound(RecordRef),

    /// A stored record changed since it was read.
    #[error("conflicting update: {0}")]
    Conflict(String),

    /// The store acknowledged a commit without reporting a created record.
    #[error("commit receipt is missing the created {0}")]
    IncompleteReceipt(&'static str),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Builds a conflict error from a description.
    pub fn conflict(description: impl Into<String>) -> Self {
        Self::Conflict(description.into())
    }
}
