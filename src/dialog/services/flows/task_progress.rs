//! Start task and submit for review: pick one of your own tasks.

use super::{chosen, offer, task_choices};
use crate::access::Role;
use crate::dialog::domain::{DialogPosition, Reply};
use crate::dialog::services::{
    engine::{DialogEngine, home},
    error::DialogResult,
    keys::TASK_CHOICES,
    step::Step,
    texts,
};
use crate::session::SessionData;
use crate::tracker::{
    domain::{Task, TaskStatus, User},
    ports::TrackerStore,
};
use mockable::Clock;

fn offer_tasks(
    session: &mut SessionData,
    role: Role,
    tasks: &[Task],
    position: DialogPosition,
    prompts: (&str, &str),
) -> DialogResult<Step> {
    let (empty, prompt) = prompts;
    if tasks.is_empty() {
        return Ok(Step::finish(home(role, empty)));
    }
    let keyboard = offer(session, TASK_CHOICES, task_choices(tasks))?;
    Ok(Step::goto(position, Reply::with_keyboard(prompt, keyboard)))
}

impl<S, C> DialogEngine<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync,
{
    pub(crate) async fn enter_start_task(
        &self,
        user: &User,
        session: &mut SessionData,
    ) -> DialogResult<Step> {
        let tasks = self
            .tracker
            .tasks_assigned(user.id, TaskStatus::NotStarted)
            .await?;
        offer_tasks(
            session,
            user.role,
            &tasks,
            DialogPosition::StartSelect,
            (texts::NO_TASKS_TO_START, texts::CHOOSE_TASK_TO_START),
        )
    }

    pub(crate) async fn enter_submit_for_review(
        &self,
        user: &User,
        session: &mut SessionData,
    ) -> DialogResult<Step> {
        let tasks = self
            .tracker
            .tasks_assigned(user.id, TaskStatus::InProgress)
            .await?;
        offer_tasks(
            session,
            user.role,
            &tasks,
            DialogPosition::SubmitSelect,
            (texts::NO_TASKS_IN_PROGRESS, texts::CHOOSE_TASK_TO_SUBMIT),
        )
    }

    pub(crate) async fn select_task_to_start(
        &self,
        user: &User,
        session: &SessionData,
        text: &str,
    ) -> DialogResult<Step> {
        let Some(task_id) = chosen(session, TASK_CHOICES, text)? else {
            return Ok(Step::finish(home(user.role, texts::INVALID_SELECTION)));
        };
        let task = self.tracker.start_task(user, task_id).await?;
        Ok(Step::finish(home(
            user.role,
            format!("✅ Task '{}' started.", task.title()),
        )))
    }

    pub(crate) async fn select_task_to_submit(
        &self,
        user: &User,
        session: &SessionData,
        text: &str,
    ) -> DialogResult<Step> {
        let Some(task_id) = chosen(session, TASK_CHOICES, text)? else {
            return Ok(Step::finish(home(user.role, texts::INVALID_SELECTION)));
        };
        let task = self.tracker.submit_for_review(user, task_id).await?;
        Ok(Step::finish(home(
            user.role,
            format!("✅ Task '{}' submitted for review.", task.title()),
        )))
    }
}
