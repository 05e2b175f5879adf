//! Review others' tasks: pick, decide, and give a reason when rejecting.

use super::{chosen, offer, required, task_choices};
use crate::dialog::domain::{APPROVE, CANCEL, DialogPosition, Keyboard, REJECT, Reply};
use crate::dialog::services::{
    engine::{DialogEngine, home},
    error::DialogResult,
    keys::{REVIEW_TASK, TASK_CHOICES},
    step::Step,
    texts,
};
use crate::session::SessionData;
use crate::tracker::{
    domain::{RecordRef, TaskStatus, TrackerDomainError, User},
    ports::TrackerStore,
    services::LifecycleError,
};
use mockable::Clock;

fn decision_keyboard() -> Keyboard {
    Keyboard::Menu(vec![
        vec![APPROVE.to_owned(), REJECT.to_owned()],
        vec![CANCEL.to_owned()],
    ])
}

impl<S, C> DialogEngine<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync,
{
    pub(crate) async fn enter_review(
        &self,
        user: &User,
        session: &mut SessionData,
    ) -> DialogResult<Step> {
        let tasks = self.tracker.reviewable_tasks(user.id).await?;
        if tasks.is_empty() {
            return Ok(Step::finish(home(user.role, texts::NOTHING_TO_REVIEW)));
        }
        let keyboard = offer(session, TASK_CHOICES, task_choices(&tasks))?;
        Ok(Step::goto(
            DialogPosition::ReviewSelect,
            Reply::with_keyboard(texts::CHOOSE_REVIEW_TASK, keyboard),
        ))
    }

    pub(crate) async fn select_review_task(
        &self,
        user: &User,
        session: &mut SessionData,
        text: &str,
    ) -> DialogResult<Step> {
        let Some(task_id) = chosen(session, TASK_CHOICES, text)? else {
            return Ok(Step::finish(home(user.role, texts::INVALID_SELECTION)));
        };
        let task = self.tracker.task(task_id).await?;
        if task.status() != TaskStatus::InReview {
            return Err(LifecycleError::NotFound(RecordRef::Task(task_id)).into());
        }
        session.set(REVIEW_TASK, &task_id)?;
        Ok(Step::goto(
            DialogPosition::ReviewDecision,
            Reply::with_keyboard(self.renderer.review_card(&task)?, decision_keyboard()),
        ))
    }

    pub(crate) async fn decide_review(
        &self,
        user: &User,
        session: &SessionData,
        text: &str,
    ) -> DialogResult<Step> {
        let task_id = required(session, REVIEW_TASK)?;
        match text {
            APPROVE => {
                let approval = self.tracker.approve_task(user, task_id).await?;
                Ok(Step::finish(home(
                    user.role,
                    format!(
                        "✅ Task approved and {} points added.",
                        approval.points_awarded
                    ),
                )))
            }
            REJECT => Ok(Step::goto(
                DialogPosition::ReviewReason,
                Reply::with_keyboard(texts::ASK_REASON, Keyboard::cancel_only()),
            )),
            _ => Ok(Step::stay(Reply::with_keyboard(
                texts::CHOOSE_DECISION,
                decision_keyboard(),
            ))),
        }
    }

    pub(crate) async fn reject_with_reason(
        &self,
        user: &User,
        session: &SessionData,
        reason: &str,
    ) -> DialogResult<Step> {
        let task_id = required(session, REVIEW_TASK)?;
        match self.tracker.reject_task(user, task_id, reason).await {
            Ok(_) => Ok(Step::finish(home(user.role, texts::TASK_REJECTED))),
            Err(LifecycleError::Domain(TrackerDomainError::EmptyRejectionReason)) => {
                Ok(Step::stay(Reply::with_keyboard(
                    texts::REASON_REQUIRED,
                    Keyboard::cancel_only(),
                )))
            }
            Err(err) => Err(err.into()),
        }
    }
}
