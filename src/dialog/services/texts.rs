//! Fixed reply texts.

pub(crate) const PLEASE_START: &str = "👋 Please send /start first.";
pub(crate) const INVALID_OPTION: &str = "❓ Invalid option. Choose from the menu.";
pub(crate) const CANCELLED: &str = "❌ Cancelled.";
pub(crate) const FORBIDDEN: &str = "⛔️ You do not have access to this.";
pub(crate) const NOT_FOUND: &str = "❌ The selected item no longer exists.";
pub(crate) const NO_ACTIVE_SPRINT: &str = "❌ No active sprint found.";
pub(crate) const INVALID_INPUT: &str = "❌ Invalid input.";
pub(crate) const TRY_AGAIN: &str = "⚠️ Something went wrong. Please try again.";
pub(crate) const INVALID_SELECTION: &str = "❌ Invalid selection.";

pub(crate) const ASK_COMPLETED: &str = "✍️ Enter the tasks you completed today:";
pub(crate) const ASK_PLANNED: &str = "📌 Enter today's plan:";
pub(crate) const ASK_BLOCKERS: &str = "🚫 Enter any blockers, or 'none':";
pub(crate) const REPORT_SAVED: &str = "✅ Daily report saved.";

pub(crate) const NO_TASKS_TO_START: &str = "❌ You have no tasks to start.";
pub(crate) const CHOOSE_TASK_TO_START: &str = "▶️ Choose a task to start:";
pub(crate) const NO_TASKS_IN_PROGRESS: &str = "❌ You have no tasks in progress.";
pub(crate) const CHOOSE_TASK_TO_SUBMIT: &str = "📤 Choose a task to submit for review:";

pub(crate) const ASK_PROJECT_NAME: &str = "📝 Enter the new project name:";
pub(crate) const EMPTY_PROJECT_NAME: &str = "❌ Project name cannot be empty.";
pub(crate) const NO_PROJECTS: &str = "❌ No projects found.";
pub(crate) const NO_OWN_PROJECTS: &str = "❌ You have no projects.";
pub(crate) const CHOOSE_PROJECT: &str = "📋 Choose a project:";
pub(crate) const INVALID_PROJECT: &str = "❌ Invalid project.";
pub(crate) const ASK_BACKLOG_LINES: &str = "✍️ Enter backlog tasks, one per line: a title followed by story points.\nExample:\nFix login bug 3\nWrite release notes 1";

pub(crate) const EMPTY_BACKLOG: &str = "❌ This project has no backlog tasks.";
pub(crate) const CHOOSE_SPRINT_TASKS: &str = "🗂 Select tasks for the sprint, then press Done:";
pub(crate) const INVALID_OR_DUPLICATE: &str = "❌ Invalid or duplicate task.";
pub(crate) const NO_TASKS_SELECTED: &str = "❌ No tasks selected.";

pub(crate) const NOTHING_TO_REVIEW: &str = "❌ No tasks are awaiting review.";
pub(crate) const CHOOSE_REVIEW_TASK: &str = "🧐 Choose a task to review:";
pub(crate) const CHOOSE_DECISION: &str = "Please choose Approve or Reject.";
pub(crate) const ASK_REASON: &str = "✍️ Enter the reason for rejection:";
pub(crate) const REASON_REQUIRED: &str = "❌ A reason is required.";
pub(crate) const TASK_REJECTED: &str = "✅ Task rejected and reason recorded.";

pub(crate) const NO_OPEN_TASKS: &str = "📭 You have no tasks.";
pub(crate) const NO_DAILY_REPORTS: &str = "❌ No daily reports yet.";
pub(crate) const END_DAILY_REPORTS: &str = "✅ End of daily reports.";
pub(crate) const NO_SPRINT_REVIEWS: &str = "❌ No sprint reviews yet.";
pub(crate) const END_SPRINT_REVIEWS: &str = "✅ End of sprint reviews.";
pub(crate) const NO_ACTIVE_SPRINTS: &str = "❌ There is no active sprint.";

pub(crate) const NO_MANAGEABLE_USERS: &str = "❌ No users to manage.";
pub(crate) const CONFIRM_WITH_BUTTONS: &str = "Please confirm or cancel the promotion.";
pub(crate) const NO_PENDING_PROMOTION: &str = "❌ No promotion is pending.";
pub(crate) const PROMOTION_CANCELLED: &str = "❌ Promotion cancelled.";
