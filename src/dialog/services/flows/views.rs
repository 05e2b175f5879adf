//! Single-step views and commands: lists, reports, sprint closure.

use crate::access::{Action, Role, authorize};
use crate::dialog::domain::{Button, Command, Keyboard, PromotionButton, Reply};
use crate::dialog::services::{
    engine::{DialogEngine, home},
    error::DialogResult,
    step::Step,
    texts,
};
use crate::tracker::{domain::User, ports::TrackerStore};
use mockable::Clock;

pub(crate) fn view_report_commands(user: &User) -> Step {
    Step::finish(home(
        user.role,
        format!(
            "📊 Reports:\n{} - recent daily reports\n{} - recent sprint reviews",
            Command::ViewDailyReports.text(),
            Command::ViewSprintReviews.text()
        ),
    ))
}

const fn promote_caption(role: Role) -> &'static str {
    match role {
        Role::Developer => "⬆️ Promote to product owner",
        Role::ProductOwner | Role::Ceo => "⬆️ Promote to CEO",
    }
}

impl<S, C> DialogEngine<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync,
{
    pub(crate) async fn view_my_tasks(&self, user: &User) -> DialogResult<Step> {
        let tasks = self.tracker.open_tasks(user.id).await?;
        if tasks.is_empty() {
            return Ok(Step::finish(home(user.role, texts::NO_OPEN_TASKS)));
        }
        Ok(Step::finish(home(user.role, self.renderer.my_tasks(&tasks)?)))
    }

    pub(crate) async fn view_projects(&self, user: &User) -> DialogResult<Step> {
        let projects = self.tracker.projects_created_by(user.id).await?;
        if projects.is_empty() {
            return Ok(Step::finish(home(user.role, texts::NO_OWN_PROJECTS)));
        }
        Ok(Step::finish(home(
            user.role,
            self.renderer.projects(&projects)?,
        )))
    }

    pub(crate) async fn view_daily_reports(&self, user: &User) -> DialogResult<Step> {
        authorize(user.role, Action::ViewReports)?;
        let reports = self.tracker.recent_daily_reports(self.recent_limit).await?;
        if reports.is_empty() {
            return Ok(Step::finish(Reply::text(texts::NO_DAILY_REPORTS)));
        }
        let mut replies = reports
            .iter()
            .map(|report| self.renderer.daily_report(report).map(Reply::text))
            .collect::<DialogResult<Vec<_>>>()?;
        replies.push(Reply::text(texts::END_DAILY_REPORTS));
        Ok(Step::finish_all(replies))
    }

    pub(crate) async fn view_sprint_reviews(&self, user: &User) -> DialogResult<Step> {
        authorize(user.role, Action::ViewReports)?;
        let reviews = self
            .tracker
            .recent_sprint_reviews(self.recent_limit)
            .await?;
        if reviews.is_empty() {
            return Ok(Step::finish(Reply::text(texts::NO_SPRINT_REVIEWS)));
        }
        let mut replies = reviews
            .iter()
            .map(|review| self.renderer.sprint_review(review).map(Reply::text))
            .collect::<DialogResult<Vec<_>>>()?;
        replies.push(Reply::text(texts::END_SPRINT_REVIEWS));
        Ok(Step::finish_all(replies))
    }

    pub(crate) async fn finalize_sprints(&self, user: &User) -> DialogResult<Step> {
        let closed = self.tracker.finalize_sprints(user).await?;
        if closed.is_empty() {
            return Ok(Step::finish(home(user.role, texts::NO_ACTIVE_SPRINTS)));
        }
        Ok(Step::finish(home(
            user.role,
            format!(
                "✅ {} active sprints closed and retrospectives recorded.",
                closed.len()
            ),
        )))
    }

    pub(crate) async fn view_manageable_users(&self, user: &User) -> DialogResult<Step> {
        let users = self.tracker.manageable_users().await?;
        if users.is_empty() {
            return Ok(Step::finish(home(user.role, texts::NO_MANAGEABLE_USERS)));
        }
        let replies = users
            .iter()
            .map(|member| {
                let button = Button::new(
                    promote_caption(member.role),
                    PromotionButton::Candidate(member.id).data(),
                );
                self.renderer
                    .user_card(member)
                    .map(|card| Reply::with_keyboard(card, Keyboard::Inline(vec![vec![button]])))
            })
            .collect::<DialogResult<Vec<_>>>()?;
        Ok(Step::finish_all(replies))
    }
}
