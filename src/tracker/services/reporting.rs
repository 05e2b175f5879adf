//! Sprint closure, stand-up reports and report listings.

use super::lifecycle::{LifecycleError, LifecycleResult, TrackerService};
use crate::access::{Action, authorize};
use crate::tracker::{
    domain::{
        DailyReport, NewDailyReport, NewRetrospective, SprintId, SprintReview, SprintStatus,
        User, UserId,
    },
    ports::{Change, StoreError, TaskFilter, TrackerStore, UnitOfWork},
};
use mockable::Clock;
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Free-text answers collected by the daily report dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyReportDraft {
    /// Work finished since the last report.
    pub completed: String,
    /// Work planned for today.
    pub planned: String,
    /// Anything blocking progress.
    pub blockers: String,
}

impl<S, C> TrackerService<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync,
{
    /// Closes every active sprint, each together with an automatic
    /// retrospective held by `actor`, one commit per sprint.
    ///
    /// Sprints closed concurrently by someone else are skipped. Returns the
    /// sprints this call closed.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] for developers or
    /// [`LifecycleError::Store`] when a lookup or commit fails.
    pub async fn finalize_sprints(&self, actor: &User) -> LifecycleResult<Vec<SprintId>> {
        authorize(actor.role, Action::FinalizeSprint)?;
        let today = self.today();
        let mut closed = Vec::new();
        for sprint in self.store.sprints_with_status(SprintStatus::Active).await? {
            let change = Change::CloseSprint {
                sprint: sprint.id,
                closed_on: today,
                retrospective: NewRetrospective::automatic(sprint.id, actor.id, today),
            };
            match self.store.commit(UnitOfWork::single(change)).await {
                Ok(_) => closed.push(sprint.id),
                Err(StoreError::Conflict(reason)) => {
                    warn!(sprint_id = %sprint.id, %reason, "sprint closed concurrently, skipping");
                }
                Err(err) => return Err(err.into()),
            }
        }
        info!(user_id = %actor.id, closed = closed.len(), "finalized sprints");
        Ok(closed)
    }

    /// Returns the first active sprint containing a task assigned to `user`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NoActiveSprint`] when no such sprint exists.
    pub async fn active_sprint_for(&self, user: UserId) -> LifecycleResult<SprintId> {
        let sprint_ids: BTreeSet<SprintId> = self
            .store
            .tasks(TaskFilter::new().assigned_to(user))
            .await?
            .iter()
            .filter_map(|task| task.sprint_id())
            .collect();
        for sprint_id in sprint_ids {
            let active = self
                .store
                .sprint(sprint_id)
                .await?
                .is_some_and(|sprint| sprint.is_active());
            if active {
                return Ok(sprint_id);
            }
        }
        Err(LifecycleError::NoActiveSprint(user))
    }

    /// Records a stand-up report against the actor's active sprint.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NoActiveSprint`] when none of the actor's
    /// tasks belongs to an active sprint, or [`LifecycleError::Store`] when
    /// the commit fails.
    pub async fn submit_daily_report(
        &self,
        actor: &User,
        draft: DailyReportDraft,
    ) -> LifecycleResult<DailyReport> {
        authorize(actor.role, Action::SubmitDailyReport)?;
        let sprint_id = self.active_sprint_for(actor.id).await?;
        let report = NewDailyReport {
            user_id: actor.id,
            sprint_id,
            report_date: self.today(),
            completed: draft.completed,
            planned: draft.planned,
            blockers: draft.blockers,
        };
        let receipt = self
            .store
            .commit(UnitOfWork::single(Change::InsertDailyReport(report.clone())))
            .await?;
        let id = receipt
            .daily_report()
            .ok_or(StoreError::IncompleteReceipt("daily report"))?;
        info!(report_id = %id, user_id = %actor.id, %sprint_id, "daily report submitted");
        Ok(DailyReport {
            id,
            user_id: report.user_id,
            sprint_id: report.sprint_id,
            report_date: report.report_date,
            completed: report.completed,
            planned: report.planned,
            blockers: report.blockers,
        })
    }

    /// Returns up to `limit` daily reports, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the lookup fails.
    pub async fn recent_daily_reports(&self, limit: usize) -> LifecycleResult<Vec<DailyReport>> {
        Ok(self.store.recent_daily_reports(limit).await?)
    }

    /// Returns up to `limit` sprint reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the lookup fails.
    pub async fn recent_sprint_reviews(&self, limit: usize) -> LifecycleResult<Vec<SprintReview>> {
        Ok(self.store.recent_sprint_reviews(limit).await?)
    }
}
