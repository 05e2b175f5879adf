//! Opaque integer identifiers for tracker records.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a registered user.
    UserId
);
record_id!(
    /// Identity of a user on the chat transport.
    ExternalUserId
);
record_id!(
    /// Identifier of a project.
    ProjectId
);
record_id!(
    /// Identifier of a sprint.
    SprintId
);
record_id!(
    /// Identifier of a task.
    TaskId
);
record_id!(
    /// Identifier of a daily report.
    DailyReportId
);
record_id!(
    /// Identifier of a sprint review.
    SprintReviewId
);
record_id!(
    /// Identifier of a retrospective.
    RetrospectiveId
);

/// Reference to a record that a lookup or change expected to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordRef {
    /// A user record.
    User(UserId),
    /// A project record.
    Project(ProjectId),
    /// A sprint record.
    Sprint(SprintId),
    /// A task record.
    Task(TaskId),
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user {id}"),
            Self::Project(id) => write!(f, "project {id}"),
            Self::Sprint(id) => write!(f, "sprint {id}"),
            Self::Task(id) => write!(f, "task {id}"),
        }
    }
}
