//! Home-menu triggers, slash commands and in-dialog control labels.

use crate::access::Action;
use std::fmt;

/// Universal cancel label, recognized in every dialog state.
pub const CANCEL: &str = "🔙 Cancel";
/// Finishes the sprint task selection.
pub const DONE: &str = "Done";
/// Returns sprint planning to project selection.
pub const CHANGE_PROJECT: &str = "🔁 Change project";
/// Approves the task under review.
pub const APPROVE: &str = "✅ Approve";
/// Rejects the task under review.
pub const REJECT: &str = "❌ Reject";

/// Returns `true` when `text` finishes a selection (case-insensitive).
#[must_use]
pub fn is_done(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case(DONE)
}

/// Entry points offered on the home menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Opens a sprint from backlog tasks.
    PlanSprint,
    /// Files a stand-up report.
    DailyReport,
    /// Lists the caller's open tasks.
    MyTasks,
    /// Hands an in-progress task over to review.
    SubmitForReview,
    /// Approves or rejects someone else's task.
    ReviewTasks,
    /// Starts a planned task.
    StartTask,
    /// Creates a project.
    AddProject,
    /// Lists the caller's projects.
    Projects,
    /// Imports backlog lines into a project.
    AddBacklog,
    /// Lists the report commands.
    Reports,
    /// Closes every active sprint.
    FinalizeSprint,
    /// Lists users with promotion buttons.
    ManageUsers,
}

impl Trigger {
    /// Every trigger in home-menu order.
    pub const ALL: [Self; 12] = [
        Self::PlanSprint,
        Self::DailyReport,
        Self::MyTasks,
        Self::SubmitForReview,
        Self::ReviewTasks,
        Self::StartTask,
        Self::AddProject,
        Self::Projects,
        Self::AddBacklog,
        Self::Reports,
        Self::FinalizeSprint,
        Self::ManageUsers,
    ];

    /// Returns the menu label that activates this trigger.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PlanSprint => "🚀 Plan sprint",
            Self::DailyReport => "📝 Daily report",
            Self::MyTasks => "📌 My tasks",
            Self::SubmitForReview => "📤 Submit for review",
            Self::ReviewTasks => "🧐 Review tasks",
            Self::StartTask => "▶️ Start task",
            Self::AddProject => "➕ Add project",
            Self::Projects => "📋 Projects",
            Self::AddBacklog => "🗂 Add backlog tasks",
            Self::Reports => "📊 Reports",
            Self::FinalizeSprint => "✅ Finalize sprint",
            Self::ManageUsers => "👥 Manage users",
        }
    }

    /// Returns the guarded action behind this trigger.
    #[must_use]
    pub const fn action(self) -> Action {
        match self {
            Self::PlanSprint => Action::CreateSprintFromBacklog,
            Self::DailyReport => Action::SubmitDailyReport,
            Self::MyTasks => Action::ViewOwnTasks,
            Self::SubmitForReview => Action::SubmitTaskForReview,
            Self::ReviewTasks => Action::ReviewOthersTasks,
            Self::StartTask => Action::StartOwnTask,
            Self::AddProject => Action::CreateProject,
            Self::Projects => Action::ListOwnProjects,
            Self::AddBacklog => Action::AddBacklogTasks,
            Self::Reports => Action::ViewReports,
            Self::FinalizeSprint => Action::FinalizeSprint,
            Self::ManageUsers => Action::ManageUsers,
        }
    }

    /// Matches `text` against the trigger labels exactly.
    #[must_use]
    pub fn from_label(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|trigger| trigger.label() == text)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Slash commands accepted outside any dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Registers the caller and shows the home menu.
    Start,
    /// Lists recent daily reports.
    ViewDailyReports,
    /// Lists recent sprint reviews.
    ViewSprintReviews,
}

impl Command {
    /// Returns the command text including the leading slash.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Start => "/start",
            Self::ViewDailyReports => "/view_daily_reports",
            Self::ViewSprintReviews => "/view_sprint_reviews",
        }
    }

    /// Parses a command, ignoring any arguments after the first word.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        [Self::Start, Self::ViewDailyReports, Self::ViewSprintReviews]
            .into_iter()
            .find(|command| command.text() == word)
    }
}
