//! Daily report: completed work, today's plan, blockers.

use super::required;
use crate::dialog::domain::{DialogPosition, Keyboard, Reply};
use crate::dialog::services::{
    engine::{DialogEngine, home},
    error::DialogResult,
    keys::{REPORT_COMPLETED, REPORT_PLANNED},
    step::Step,
    texts,
};
use crate::session::SessionData;
use crate::tracker::{domain::User, ports::TrackerStore, services::DailyReportDraft};
use mockable::Clock;
use tracing::info;

fn ask(position: DialogPosition, prompt: &str) -> Step {
    Step::goto(position, Reply::with_keyboard(prompt, Keyboard::cancel_only()))
}

pub(crate) fn enter_daily_report() -> Step {
    ask(DialogPosition::ReportCompleted, texts::ASK_COMPLETED)
}

pub(crate) fn record_completed_work(session: &mut SessionData, text: &str) -> DialogResult<Step> {
    session.set(REPORT_COMPLETED, &text.to_owned())?;
    Ok(ask(DialogPosition::ReportPlanned, texts::ASK_PLANNED))
}

pub(crate) fn record_planned_work(session: &mut SessionData, text: &str) -> DialogResult<Step> {
    session.set(REPORT_PLANNED, &text.to_owned())?;
    Ok(ask(DialogPosition::ReportBlockers, texts::ASK_BLOCKERS))
}

impl<S, C> DialogEngine<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync,
{
    pub(crate) async fn submit_daily_report(
        &self,
        user: &User,
        session: &SessionData,
        blockers: &str,
    ) -> DialogResult<Step> {
        let draft = DailyReportDraft {
            completed: required(session, REPORT_COMPLETED)?,
            planned: required(session, REPORT_PLANNED)?,
            blockers: blockers.to_owned(),
        };
        let report = self.tracker.submit_daily_report(user, draft).await?;
        info!(report_id = %report.id, sprint_id = %report.sprint_id, "daily report dialog finished");
        Ok(Step::finish(home(user.role, texts::REPORT_SAVED)))
    }
}
