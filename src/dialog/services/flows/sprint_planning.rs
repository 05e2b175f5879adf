//! Create sprint from backlog: choose a project, toggle tasks, finish.

use super::{chosen, offer, project_choices};
use crate::dialog::domain::{CANCEL, CHANGE_PROJECT, DONE, DialogPosition, Keyboard, Reply, is_done};
use crate::dialog::services::{
    engine::{DialogEngine, home},
    error::DialogResult,
    keys::{Choices, PROJECT_CHOICES, SELECTED_TASKS, TASK_CHOICES},
    step::Step,
    texts,
};
use crate::session::SessionData;
use crate::tracker::{
    domain::{Task, TaskId, User},
    ports::TrackerStore,
};
use mockable::Clock;
use tracing::debug;

fn planning_label(task: &Task) -> String {
    format!("{} ({})", task.label(), task.story_points().unwrap_or_default())
}

fn planning_keyboard(labels: Vec<String>) -> Keyboard {
    let mut rows: Vec<Vec<String>> = labels.into_iter().map(|label| vec![label]).collect();
    rows.push(vec![DONE.to_owned(), CHANGE_PROJECT.to_owned()]);
    rows.push(vec![CANCEL.to_owned()]);
    Keyboard::Menu(rows)
}

impl<S, C> DialogEngine<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync,
{
    pub(crate) async fn enter_sprint_planning(
        &self,
        user: &User,
        session: &mut SessionData,
    ) -> DialogResult<Step> {
        let projects = self.tracker.all_projects().await?;
        if projects.is_empty() {
            return Ok(Step::finish(home(user.role, texts::NO_PROJECTS)));
        }
        let keyboard = offer(session, PROJECT_CHOICES, project_choices(&projects))?;
        Ok(Step::goto(
            DialogPosition::SprintProject,
            Reply::with_keyboard(texts::CHOOSE_PROJECT, keyboard),
        ))
    }

    pub(crate) async fn select_sprint_project(
        &self,
        user: &User,
        session: &mut SessionData,
        text: &str,
    ) -> DialogResult<Step> {
        let Some(project_id) = chosen(session, PROJECT_CHOICES, text)? else {
            return Ok(Step::finish(home(user.role, texts::INVALID_PROJECT)));
        };
        let project = self.tracker.project(project_id).await?;
        let backlog = self.tracker.backlog(project.id).await?;
        if backlog.is_empty() {
            return Ok(Step::finish(home(user.role, texts::EMPTY_BACKLOG)));
        }
        let labels: Vec<String> = backlog.iter().map(planning_label).collect();
        let lookup: Choices<TaskId> = labels
            .iter()
            .cloned()
            .zip(backlog.iter().map(Task::id))
            .collect();
        session.set(TASK_CHOICES, &lookup)?;
        session.set(SELECTED_TASKS, &Vec::<TaskId>::new())?;
        Ok(Step::goto(
            DialogPosition::SprintTasks,
            Reply::with_keyboard(texts::CHOOSE_SPRINT_TASKS, planning_keyboard(labels)),
        ))
    }

    pub(crate) async fn select_sprint_task(
        &self,
        user: &User,
        session: &mut SessionData,
        text: &str,
    ) -> DialogResult<Step> {
        let mut selected = session.get(SELECTED_TASKS)?.unwrap_or_default();
        if is_done(text) {
            if selected.is_empty() {
                return Ok(Step::finish(home(user.role, texts::NO_TASKS_SELECTED)));
            }
            let sprint_id = self.tracker.plan_sprint(user, &selected).await?;
            return Ok(Step::finish(home(
                user.role,
                format!("✅ {} tasks added to sprint {sprint_id}.", selected.len()),
            )));
        }
        if text == CHANGE_PROJECT {
            session.remove(TASK_CHOICES);
            session.remove(SELECTED_TASKS);
            return self.enter_sprint_planning(user, session).await;
        }
        match chosen(session, TASK_CHOICES, text)? {
            Some(task_id) if !selected.contains(&task_id) => {
                selected.push(task_id);
                session.set(SELECTED_TASKS, &selected)?;
                debug!(user_id = %user.id, %task_id, selected = selected.len(), "task selected for sprint");
                Ok(Step::stay(Reply::text(format!(
                    "✅ Task '{text}' added; press {DONE} to finish."
                ))))
            }
            _ => Ok(Step::stay(Reply::text(texts::INVALID_OR_DUPLICATE))),
        }
    }
}
