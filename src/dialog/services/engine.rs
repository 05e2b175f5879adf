//! Event routing and session bookkeeping for every dialog.

use super::error::{DialogError, DialogResult, Failure};
use super::flows::{
    enter_add_project, enter_daily_report, record_completed_work, record_planned_work,
    view_report_commands,
};
use super::keys::POSITION;
use super::render::Renderer;
use super::step::{Next, Step};
use super::texts;
use crate::access::{Role, authorize};
use crate::dialog::domain::{
    CANCEL, Command, DialogPosition, Inbound, Payload, Reply, Trigger, home_menu,
};
use crate::session::{SessionData, SessionRegistry};
use crate::tracker::{domain::User, ports::TrackerStore, services::TrackerService};
use mockable::Clock;
use tracing::{debug, error, info, warn};

/// Number of reports listed by the report commands unless configured.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Drives the multi-step dialogs of every user.
///
/// Events of one user are serialized through that user's session lock;
/// events of different users run concurrently. Every step re-evaluates the
/// caller's current role before acting.
pub struct DialogEngine<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync,
{
    pub(super) tracker: TrackerService<S, C>,
    pub(super) renderer: Renderer,
    pub(super) recent_limit: usize,
    sessions: SessionRegistry,
}

impl<S, C> DialogEngine<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync,
{
    /// Creates an engine with empty sessions.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::Render`] when a reply template fails to
    /// compile.
    pub fn new(tracker: TrackerService<S, C>) -> DialogResult<Self> {
        Ok(Self {
            tracker,
            renderer: Renderer::new()?,
            recent_limit: DEFAULT_RECENT_LIMIT,
            sessions: SessionRegistry::new(),
        })
    }

    /// Sets how many records the report commands list.
    #[must_use]
    pub const fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Returns the session registry.
    #[must_use]
    pub const fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Handles one inbound event and returns the replies to send.
    ///
    /// Failures never escape: they are turned into user-visible replies at
    /// this boundary.
    pub async fn handle(&self, event: Inbound) -> Vec<Reply> {
        let mut session = match self.sessions.acquire(event.user).await {
            Ok(guard) => guard,
            Err(err) => {
                error!(user = %event.user, error = %err, "session unavailable");
                return vec![Reply::text(texts::TRY_AGAIN)];
            }
        };
        let outcome = self.route(&event, &mut session).await;
        outcome.unwrap_or_else(|err| recover(&event, &mut session, &err))
    }

    async fn route(&self, event: &Inbound, session: &mut SessionData) -> DialogResult<Vec<Reply>> {
        if let Payload::Text(text) = &event.payload
            && Command::parse(text) == Some(Command::Start)
        {
            return self.start(event, session).await;
        }
        let Some(user) = self.tracker.find_user(event.user).await? else {
            session.clear();
            return Ok(vec![Reply::text(texts::PLEASE_START)]);
        };
        let step = match &event.payload {
            Payload::Button(data) => self.press(&user, session, data).await?,
            Payload::Text(text) => self.dispatch(&user, session, text.trim()).await?,
        };
        settle(session, step)
    }

    async fn start(&self, event: &Inbound, session: &mut SessionData) -> DialogResult<Vec<Reply>> {
        session.clear();
        let registration = self
            .tracker
            .register(event.user, &event.display_name)
            .await?;
        let user = registration.user;
        let greeting = if registration.created {
            format!("👋 Welcome, {}! You are registered as a developer.", user.name)
        } else {
            format!("👋 Hello {}! Choose an option:", user.name)
        };
        Ok(vec![home(user.role, greeting)])
    }

    async fn dispatch(
        &self,
        user: &User,
        session: &mut SessionData,
        text: &str,
    ) -> DialogResult<Step> {
        if text == CANCEL {
            debug!(user_id = %user.id, "dialog cancelled");
            return Ok(Step::finish(home(user.role, texts::CANCELLED)));
        }
        if let Some(command) = Command::parse(text) {
            session.clear();
            return self.command(user, command).await;
        }
        if let Some(trigger) = Trigger::from_label(text) {
            session.clear();
            return self.enter(user, session, trigger).await;
        }
        match session.get(POSITION)? {
            Some(position) => {
                authorize(user.role, position.action())?;
                debug!(user_id = %user.id, %position, "advancing dialog");
                self.advance(user, session, position, text).await
            }
            None => Ok(Step::finish(home(user.role, texts::INVALID_OPTION))),
        }
    }

    async fn command(&self, user: &User, command: Command) -> DialogResult<Step> {
        match command {
            Command::Start => Ok(Step::finish(home(user.role, texts::INVALID_OPTION))),
            Command::ViewDailyReports => self.view_daily_reports(user).await,
            Command::ViewSprintReviews => self.view_sprint_reviews(user).await,
        }
    }

    async fn enter(
        &self,
        user: &User,
        session: &mut SessionData,
        trigger: Trigger,
    ) -> DialogResult<Step> {
        authorize(user.role, trigger.action())?;
        info!(user_id = %user.id, %trigger, "dialog entered");
        match trigger {
            Trigger::PlanSprint => self.enter_sprint_planning(user, session).await,
            Trigger::DailyReport => Ok(enter_daily_report()),
            Trigger::MyTasks => self.view_my_tasks(user).await,
            Trigger::SubmitForReview => self.enter_submit_for_review(user, session).await,
            Trigger::ReviewTasks => self.enter_review(user, session).await,
            Trigger::StartTask => self.enter_start_task(user, session).await,
            Trigger::AddProject => Ok(enter_add_project()),
            Trigger::Projects => self.view_projects(user).await,
            Trigger::AddBacklog => self.enter_backlog_import(user, session).await,
            Trigger::Reports => Ok(view_report_commands(user)),
            Trigger::FinalizeSprint => self.finalize_sprints(user).await,
            Trigger::ManageUsers => self.view_manageable_users(user).await,
        }
    }

    async fn advance(
        &self,
        user: &User,
        session: &mut SessionData,
        position: DialogPosition,
        text: &str,
    ) -> DialogResult<Step> {
        match position {
            DialogPosition::ReportCompleted => record_completed_work(session, text),
            DialogPosition::ReportPlanned => record_planned_work(session, text),
            DialogPosition::ReportBlockers => self.submit_daily_report(user, session, text).await,
            DialogPosition::StartSelect => self.select_task_to_start(user, session, text).await,
            DialogPosition::SubmitSelect => self.select_task_to_submit(user, session, text).await,
            DialogPosition::ProjectName => self.name_project(user, text).await,
            DialogPosition::BacklogProject => {
                self.select_backlog_project(user, session, text).await
            }
            DialogPosition::BacklogLines => self.import_backlog_lines(user, session, text).await,
            DialogPosition::SprintProject => self.select_sprint_project(user, session, text).await,
            DialogPosition::SprintTasks => self.select_sprint_task(user, session, text).await,
            DialogPosition::ReviewSelect => self.select_review_task(user, session, text).await,
            DialogPosition::ReviewDecision => self.decide_review(user, session, text).await,
            DialogPosition::ReviewReason => self.reject_with_reason(user, session, text).await,
            DialogPosition::PromotionConfirm => {
                Ok(Step::stay(Reply::text(texts::CONFIRM_WITH_BUTTONS)))
            }
        }
    }
}

/// A reply carrying the home menu of `role`.
pub(crate) fn home(role: Role, text: impl Into<String>) -> Reply {
    Reply::with_keyboard(text, home_menu(role))
}

fn settle(session: &mut SessionData, step: Step) -> DialogResult<Vec<Reply>> {
    match step.next {
        Next::Stay => {}
        Next::Goto(position) => session.set(POSITION, &position)?,
        Next::Finish => session.clear(),
    }
    Ok(step.replies)
}

fn recover(event: &Inbound, session: &mut SessionData, err: &DialogError) -> Vec<Reply> {
    let failure = err.failure();
    let text = match failure {
        Failure::Forbidden => {
            debug!(user = %event.user, error = %err, "step denied");
            texts::FORBIDDEN
        }
        Failure::NotFound => {
            info!(user = %event.user, error = %err, "step referenced a missing record");
            texts::NOT_FOUND
        }
        Failure::NoActiveSprint => texts::NO_ACTIVE_SPRINT,
        Failure::Invalid => {
            debug!(user = %event.user, error = %err, "step rejected input");
            texts::INVALID_INPUT
        }
        Failure::Retry => {
            warn!(user = %event.user, error = %err, "step failed, session kept for retry");
            texts::TRY_AGAIN
        }
    };
    if failure.ends_dialog() {
        session.clear();
    }
    vec![Reply::text(text)]
}
