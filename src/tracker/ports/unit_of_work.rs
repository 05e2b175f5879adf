//! Atomic write units for the tracker store.

use crate::access::Role;
use crate::tracker::domain::{
    DailyReportId, NewDailyReport, NewProject, NewRetrospective, NewSprint, NewSprintReview,
    NewTask, NewUser, ProjectId, RetrospectiveId, SprintId, SprintReviewId, Task, TaskId,
    TaskStatus, UserId,
};
use chrono::{DateTime, NaiveDate, Utc};

/// A single mutation inside a [`UnitOfWork`].
///
/// Mutations of existing rows carry the state they expect to find so that a
/// concurrent change rejects the whole unit instead of being overwritten.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Registers a new user.
    InsertUser(NewUser),
    /// Refreshes a user's last-login timestamp.
    TouchLogin {
        /// The user.
        user: UserId,
        /// New last-login timestamp.
        at: DateTime<Utc>,
    },
    /// Changes a role, provided the user still holds `expected`.
    SetRole {
        /// The user.
        user: UserId,
        /// Role the user must currently hold.
        expected: Role,
        /// Role to assign.
        role: Role,
    },
    /// Adds story points to a user's running total.
    AwardPoints {
        /// The credited user.
        user: UserId,
        /// Points to add.
        points: u32,
    },
    /// Creates a project.
    InsertProject(NewProject),
    /// Creates a backlog task.
    InsertTask(NewTask),
    /// Overwrites a task, provided its stored status is still `expected`.
    UpdateTask {
        /// The updated task.
        task: Task,
        /// Status the stored task must currently have.
        expected: TaskStatus,
    },
    /// Opens a sprint and attaches the planned tasks to it.
    ///
    /// Every task must still be in the backlog in storage.
    PlanSprint {
        /// The new sprint.
        sprint: NewSprint,
        /// Tasks already moved to `NotStarted` and assigned.
        tasks: Vec<Task>,
    },
    /// Completes an active sprint together with its retrospective.
    CloseSprint {
        /// The sprint to close.
        sprint: SprintId,
        /// Closing day, recorded as the sprint end date.
        closed_on: NaiveDate,
        /// Retrospective to append.
        retrospective: NewRetrospective,
    },
    /// Appends a daily report.
    InsertDailyReport(NewDailyReport),
    /// Appends a sprint review.
    InsertSprintReview(NewSprintReview),
}

/// Ordered list of changes committed all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitOfWork {
    changes: Vec<Change>,
}

impl UnitOfWork {
    /// Creates a unit holding one change.
    #[must_use]
    pub fn single(change: Change) -> Self {
        Self {
            changes: vec![change],
        }
    }

    /// Appends a change.
    #[must_use]
    pub fn with(mut self, change: Change) -> Self {
        self.changes.push(change);
        self
    }

    /// Appends a change (mutable version).
    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    /// Returns the changes in commit order.
    #[must_use]
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Returns `true` when there is nothing to commit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl FromIterator<Change> for UnitOfWork {
    fn from_iter<I: IntoIterator<Item = Change>>(iter: I) -> Self {
        Self {
            changes: iter.into_iter().collect(),
        }
    }
}

/// A record created by a committed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatedRecord {
    /// A user was registered.
    User(UserId),
    /// A project was created.
    Project(ProjectId),
    /// A task was created.
    Task(TaskId),
    /// A sprint was opened.
    Sprint(SprintId),
    /// A daily report was appended.
    DailyReport(DailyReportId),
    /// A sprint review was appended.
    SprintReview(SprintReviewId),
    /// A retrospective was appended.
    Retrospective(RetrospectiveId),
}

/// Identifiers of every record created by a committed unit, in change order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReceipt {
    created: Vec<CreatedRecord>,
}

impl CommitReceipt {
    /// Creates an empty receipt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a created row.
    pub fn record(&mut self, record: CreatedRecord) {
        self.created.push(record);
    }

    /// Returns every created record.
    #[must_use]
    pub fn created(&self) -> &[CreatedRecord] {
        &self.created
    }

    /// Returns the first registered user.
    #[must_use]
    pub fn user(&self) -> Option<UserId> {
        self.created.iter().find_map(|record| match record {
            CreatedRecord::User(id) => Some(*id),
            _ => None,
        })
    }

    /// Returns the first created project.
    #[must_use]
    pub fn project(&self) -> Option<ProjectId> {
        self.created.iter().find_map(|record| match record {
            CreatedRecord::Project(id) => Some(*id),
            _ => None,
        })
    }

    /// Returns the first opened sprint.
    #[must_use]
    pub fn sprint(&self) -> Option<SprintId> {
        self.created.iter().find_map(|record| match record {
            CreatedRecord::Sprint(id) => Some(*id),
            _ => None,
        })
    }

    /// Returns the first appended daily report.
    #[must_use]
    pub fn daily_report(&self) -> Option<DailyReportId> {
        self.created.iter().find_map(|record| match record {
            CreatedRecord::DailyReport(id) => Some(*id),
            _ => None,
        })
    }

    /// Returns every created task.
    #[must_use]
    pub fn tasks(&self) -> Vec<TaskId> {
        self.created
            .iter()
            .filter_map(|record| match record {
                CreatedRecord::Task(id) => Some(*id),
                _ => None,
            })
            .collect()
    }
}
