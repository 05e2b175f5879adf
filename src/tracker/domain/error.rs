//! Error types for tracker domain validation and parsing.

use super::{TaskId, TaskStatus, UserId};
use crate::access::Role;
use thiserror::Error;

/// Errors returned while constructing or mutating tracker records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerDomainError {
    /// The task status change is not an edge of the lifecycle graph.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// The task being transitioned.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// A rejection was submitted without a reason.
    #[error("rejection reason must not be empty")]
    EmptyRejectionReason,

    /// A sprint review completion share is NaN or outside 0 to 100.
    #[error("completion percentage must be between 0 and 100")]
    CompletionOutOfRange,

    /// A name or title exceeds the stored length.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// The offending field.
        field: &'static str,
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// A sprint cannot be opened without tasks.
    #[error("a sprint needs at least one task")]
    EmptySprint,

    /// The task is assigned to somebody else.
    #[error("task {task_id} is not assigned to user {user_id}")]
    NotAssignee {
        /// The task in question.
        task_id: TaskId,
        /// The requesting user.
        user_id: UserId,
    },

    /// A reviewer tried to review their own task.
    #[error("user {user_id} cannot review their own task {task_id}")]
    SelfReview {
        /// The task in question.
        task_id: TaskId,
        /// The reviewer.
        user_id: UserId,
    },

    /// The promotion target does not hold a promotable role.
    #[error("user {user_id} with role {role} cannot be promoted")]
    InvalidPromotion {
        /// The promotion target.
        user_id: UserId,
        /// Role currently held by the target.
        role: Role,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing sprint statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sprint status: {0}")]
pub struct ParseSprintStatusError(pub String);
