//! Session slots used by the dialogs.

use crate::dialog::domain::DialogPosition;
use crate::session::SessionKey;
use crate::tracker::domain::{ProjectId, TaskId, UserId};
use std::collections::BTreeMap;

/// Label-to-id lookup offered on the last keyboard.
pub(crate) type Choices<T> = BTreeMap<String, T>;

pub(crate) const POSITION: SessionKey<DialogPosition> = SessionKey::new("position");
pub(crate) const PROJECT_CHOICES: SessionKey<Choices<ProjectId>> =
    SessionKey::new("project_choices");
pub(crate) const TASK_CHOICES: SessionKey<Choices<TaskId>> = SessionKey::new("task_choices");
pub(crate) const SELECTED_TASKS: SessionKey<Vec<TaskId>> = SessionKey::new("selected_tasks");
pub(crate) const BACKLOG_PROJECT: SessionKey<ProjectId> = SessionKey::new("backlog_project");
pub(crate) const REVIEW_TASK: SessionKey<TaskId> = SessionKey::new("review_task");
pub(crate) const PROMOTION_CANDIDATE: SessionKey<UserId> =
    SessionKey::new("promotion_candidate");
pub(crate) const REPORT_COMPLETED: SessionKey<String> = SessionKey::new("report_completed");
pub(crate) const REPORT_PLANNED: SessionKey<String> = SessionKey::new("report_planned");
