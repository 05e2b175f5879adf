//! Add backlog tasks: choose one of your projects, then paste lines.

use super::{chosen, offer, project_choices, required};
use crate::dialog::domain::{DialogPosition, Keyboard, Reply};
use crate::dialog::services::{
    engine::{DialogEngine, home},
    error::DialogResult,
    keys::{BACKLOG_PROJECT, PROJECT_CHOICES},
    step::Step,
    texts,
};
use crate::session::SessionData;
use crate::tracker::{domain::User, ports::TrackerStore};
use mockable::Clock;

impl<S, C> DialogEngine<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync,
{
    pub(crate) async fn enter_backlog_import(
        &self,
        user: &User,
        session: &mut SessionData,
    ) -> DialogResult<Step> {
        let projects = self.tracker.projects_created_by(user.id).await?;
        if projects.is_empty() {
            return Ok(Step::finish(home(user.role, texts::NO_OWN_PROJECTS)));
        }
        let keyboard = offer(session, PROJECT_CHOICES, project_choices(&projects))?;
        Ok(Step::goto(
            DialogPosition::BacklogProject,
            Reply::with_keyboard(texts::CHOOSE_PROJECT, keyboard),
        ))
    }

    pub(crate) async fn select_backlog_project(
        &self,
        user: &User,
        session: &mut SessionData,
        text: &str,
    ) -> DialogResult<Step> {
        let Some(project_id) = chosen(session, PROJECT_CHOICES, text)? else {
            return Ok(Step::finish(home(user.role, texts::INVALID_PROJECT)));
        };
        let project = self.tracker.project(project_id).await?;
        session.set(BACKLOG_PROJECT, &project.id)?;
        Ok(Step::goto(
            DialogPosition::BacklogLines,
            Reply::with_keyboard(texts::ASK_BACKLOG_LINES, Keyboard::cancel_only()),
        ))
    }

    pub(crate) async fn import_backlog_lines(
        &self,
        user: &User,
        session: &SessionData,
        text: &str,
    ) -> DialogResult<Step> {
        let project_id = required(session, BACKLOG_PROJECT)?;
        let created = self
            .tracker
            .import_backlog(user, project_id, text)
            .await?;
        Ok(Step::finish(home(
            user.role,
            format!("✅ {created} tasks added to the backlog."),
        )))
    }
}
