//! Add project: a single name prompt.

use crate::dialog::domain::{DialogPosition, Keyboard, Reply};
use crate::dialog::services::{
    engine::{DialogEngine, home},
    error::DialogResult,
    step::Step,
    texts,
};
use crate::tracker::{
    domain::{MAX_NAME_CHARS, TrackerDomainError, User},
    ports::TrackerStore,
    services::LifecycleError,
};
use mockable::Clock;

pub(crate) fn enter_add_project() -> Step {
    Step::goto(
        DialogPosition::ProjectName,
        Reply::with_keyboard(texts::ASK_PROJECT_NAME, Keyboard::cancel_only()),
    )
}

impl<S, C> DialogEngine<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync,
{
    pub(crate) async fn name_project(&self, user: &User, name: &str) -> DialogResult<Step> {
        match self.tracker.create_project(user, name).await {
            Ok(project) => Ok(Step::finish(home(
                user.role,
                format!("✅ Project '{}' created.", project.name),
            ))),
            Err(LifecycleError::Domain(TrackerDomainError::EmptyProjectName)) => {
                Ok(Step::finish(home(user.role, texts::EMPTY_PROJECT_NAME)))
            }
            Err(LifecycleError::Domain(TrackerDomainError::TooLong { .. })) => Ok(Step::finish(
                home(
                    user.role,
                    format!("❌ Project name must be at most {MAX_NAME_CHARS} characters."),
                ),
            )),
            Err(err) => Err(err.into()),
        }
    }
}
