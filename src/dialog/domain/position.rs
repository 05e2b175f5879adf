//! Where a user currently is inside a dialog.

use crate::access::Action;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dialog state awaiting the user's next input.
///
/// Stored in the session, so a position survives between events but not a
/// process restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogPosition {
    /// Daily report: waiting for completed work.
    ReportCompleted,
    /// Daily report: waiting for today's plan.
    ReportPlanned,
    /// Daily report: waiting for blockers.
    ReportBlockers,
    /// Start task: waiting for a task choice.
    StartSelect,
    /// Submit for review: waiting for a task choice.
    SubmitSelect,
    /// Add project: waiting for the project name.
    ProjectName,
    /// Backlog import: waiting for a project choice.
    BacklogProject,
    /// Backlog import: waiting for backlog lines.
    BacklogLines,
    /// Sprint planning: waiting for a project choice.
    SprintProject,
    /// Sprint planning: accumulating task choices.
    SprintTasks,
    /// Review: waiting for a task choice.
    ReviewSelect,
    /// Review: waiting for approve or reject.
    ReviewDecision,
    /// Review: waiting for the rejection reason.
    ReviewReason,
    /// Promotion: waiting for the CEO handover confirmation.
    PromotionConfirm,
}

impl DialogPosition {
    /// Returns the guarded action the dialog performs.
    #[must_use]
    pub const fn action(self) -> Action {
        match self {
            Self::ReportCompleted | Self::ReportPlanned | Self::ReportBlockers => {
                Action::SubmitDailyReport
            }
            Self::StartSelect => Action::StartOwnTask,
            Self::SubmitSelect => Action::SubmitTaskForReview,
            Self::ProjectName => Action::CreateProject,
            Self::BacklogProject | Self::BacklogLines => Action::AddBacklogTasks,
            Self::SprintProject | Self::SprintTasks => Action::CreateSprintFromBacklog,
            Self::ReviewSelect | Self::ReviewDecision | Self::ReviewReason => {
                Action::ReviewOthersTasks
            }
            Self::PromotionConfirm => Action::ApprovePromotion,
        }
    }

    /// Returns the dialog name used in logs.
    #[must_use]
    pub const fn dialog(self) -> &'static str {
        match self {
            Self::ReportCompleted | Self::ReportPlanned | Self::ReportBlockers => "daily_report",
            Self::StartSelect => "start_task",
            Self::SubmitSelect => "submit_for_review",
            Self::ProjectName => "add_project",
            Self::BacklogProject | Self::BacklogLines => "add_backlog",
            Self::SprintProject | Self::SprintTasks => "plan_sprint",
            Self::ReviewSelect | Self::ReviewDecision | Self::ReviewReason => "review",
            Self::PromotionConfirm => "promotion",
        }
    }
}

impl fmt::Display for DialogPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            Self::ReportCompleted => "completed",
            Self::ReportPlanned => "planned",
            Self::ReportBlockers => "blockers",
            Self::StartSelect | Self::SubmitSelect | Self::ReviewSelect => "select",
            Self::ProjectName => "name",
            Self::BacklogProject | Self::SprintProject => "select_project",
            Self::BacklogLines => "enter_lines",
            Self::SprintTasks => "select_tasks",
            Self::ReviewDecision => "decision",
            Self::ReviewReason => "reason",
            Self::PromotionConfirm => "confirm",
        };
        write!(f, "{}/{step}", self.dialog())
    }
}
