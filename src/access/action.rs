//! Closed set of guarded actions and their allowed roles.

use super::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

const MANAGERS: &[Role] = &[Role::ProductOwner, Role::Ceo];
const CEO_ONLY: &[Role] = &[Role::Ceo];
const EVERYONE: &[Role] = &[Role::Developer, Role::ProductOwner, Role::Ceo];

/// Action a user may attempt through a dialog or command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a new project.
    CreateProject,
    /// List projects created by the requester.
    ListOwnProjects,
    /// Import tasks into a project backlog.
    AddBacklogTasks,
    /// Close every active sprint.
    FinalizeSprint,
    /// Read daily reports and sprint reviews.
    ViewReports,
    /// List users and open the promotion flow.
    ManageUsers,
    /// Change another user's role.
    ApprovePromotion,
    /// Open a sprint from selected backlog tasks.
    CreateSprintFromBacklog,
    /// File a daily stand-up report.
    SubmitDailyReport,
    /// Move an in-progress task into review.
    SubmitTaskForReview,
    /// List tasks assigned to the requester.
    ViewOwnTasks,
    /// Start a not-yet-started task.
    StartOwnTask,
    /// Approve or reject a task assigned to someone else.
    ReviewOthersTasks,
}

impl Action {
    /// Returns the roles permitted to perform this action.
    #[must_use]
    pub const fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::CreateProject
            | Self::ListOwnProjects
            | Self::AddBacklogTasks
            | Self::FinalizeSprint
            | Self::ViewReports => MANAGERS,
            Self::ManageUsers | Self::ApprovePromotion => CEO_ONLY,
            Self::CreateSprintFromBacklog
            | Self::SubmitDailyReport
            | Self::SubmitTaskForReview
            | Self::ViewOwnTasks
            | Self::StartOwnTask
            | Self::ReviewOthersTasks => EVERYONE,
        }
    }

    /// Returns a short human-readable description.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::CreateProject => "create projects",
            Self::ListOwnProjects => "list projects",
            Self::AddBacklogTasks => "add backlog tasks",
            Self::FinalizeSprint => "finalize sprints",
            Self::ViewReports => "view reports",
            Self::ManageUsers => "manage users",
            Self::ApprovePromotion => "approve promotions",
            Self::CreateSprintFromBacklog => "create sprints",
            Self::SubmitDailyReport => "submit daily reports",
            Self::SubmitTaskForReview => "submit tasks for review",
            Self::ViewOwnTasks => "view tasks",
            Self::StartOwnTask => "start tasks",
            Self::ReviewOthersTasks => "review tasks",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
