//! Step handlers, one module per dialog.

mod backlog;
mod daily_report;
mod project;
mod promotion;
mod review;
mod sprint_planning;
mod task_progress;
mod views;

pub(crate) use daily_report::{enter_daily_report, record_completed_work, record_planned_work};
pub(crate) use project::enter_add_project;
pub(crate) use views::view_report_commands;

use super::error::{DialogError, DialogResult};
use super::keys::Choices;
use crate::dialog::domain::{CANCEL, Command, Keyboard, Trigger};
use crate::session::{SessionData, SessionKey};
use crate::tracker::domain::{Project, ProjectId, Task, TaskId};
use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;

/// Stores the label lookup in the session and returns the matching keyboard.
fn offer<T: Serialize>(
    session: &mut SessionData,
    key: SessionKey<Choices<T>>,
    choices: Vec<(String, T)>,
) -> DialogResult<Keyboard> {
    let keyboard = Keyboard::choices(choices.iter().map(|(label, _)| label.clone()));
    let lookup: Choices<T> = choices.into_iter().collect();
    session.set(key, &lookup)?;
    Ok(keyboard)
}

/// Resolves `text` against the labels last offered under `key`.
fn chosen<T: DeserializeOwned>(
    session: &SessionData,
    key: SessionKey<Choices<T>>,
    text: &str,
) -> DialogResult<Option<T>> {
    Ok(session.get(key)?.and_then(|mut lookup| lookup.remove(text)))
}

/// Reads a scratch value the current position cannot do without.
fn required<T: DeserializeOwned>(session: &SessionData, key: SessionKey<T>) -> DialogResult<T> {
    session
        .get(key)?
        .ok_or(DialogError::MissingScratch(key.name()))
}

fn task_choices(tasks: &[Task]) -> Vec<(String, TaskId)> {
    tasks.iter().map(|task| (task.label(), task.id())).collect()
}

/// Returns `true` when the router would consume `label` before the dialog
/// position sees it.
fn is_routed(label: &str) -> bool {
    label == CANCEL || Trigger::from_label(label).is_some() || Command::parse(label).is_some()
}

/// Project labels, suffixed with the id when a name is not unique and
/// prefixed with it when the bare name would be taken for a menu entry or
/// command.
fn project_choices(projects: &[Project]) -> Vec<(String, ProjectId)> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for project in projects {
        *seen.entry(project.name.as_str()).or_default() += 1;
    }
    projects
        .iter()
        .map(|project| {
            let shared = seen.get(project.name.as_str()).is_some_and(|count| *count > 1);
            let label = if is_routed(&project.name) {
                format!("#{} {}", project.id, project.name)
            } else if shared {
                format!("{} #{}", project.name, project.id)
            } else {
                project.name.clone()
            };
            (label, project.id)
        })
        .collect()
}
