//! Domain model for agile tracking.
//!
//! Users, projects, sprints, tasks and the append-only sprint records are
//! plain data; the task aggregate owns the status lifecycle. Storage ids are
//! opaque integers assigned by the store.

mod backlog;
mod error;
mod ids;
mod project;
mod report;
mod sprint;
mod task;
mod user;

pub use backlog::{BacklogEntry, parse_backlog, parse_backlog_line};
pub use error::{ParseSprintStatusError, ParseTaskStatusError, TrackerDomainError};
pub use ids::{
    DailyReportId, ExternalUserId, ProjectId, RecordRef, RetrospectiveId, SprintId,
    SprintReviewId, TaskId, UserId,
};
pub use project::{MAX_NAME_CHARS, NewProject, Project};
pub use report::{
    AUTOMATIC_RETROSPECTIVE, DailyReport, NewDailyReport, NewRetrospective, NewSprintReview,
    Retrospective, SprintReview,
};
pub use sprint::{NewSprint, Sprint, SprintStatus};
pub use task::{NewTask, PersistedTaskData, Task, TaskStatus};
pub use user::{NewUser, User};
