//! In-memory tracker store for tests and database-less deployments.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::access::Role;
use crate::tracker::{
    domain::{
        DailyReport, DailyReportId, ExternalUserId, Project, ProjectId, RecordRef, Retrospective,
        RetrospectiveId, Sprint, SprintId, SprintReview, SprintReviewId, SprintStatus, Task,
        TaskId, TaskStatus, User, UserId,
    },
    ports::{
        Change, CommitReceipt, CreatedRecord, ProjectFilter, StoreError, StoreResult, TaskFilter,
        TrackerStore, UnitOfWork,
    },
};

/// Thread-safe in-memory tracker store.
///
/// Commits are applied to a staged copy of the state which replaces the
/// live state only when every change succeeded.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackerStore {
    state: Arc<RwLock<InMemoryTrackerState>>,
}

#[derive(Debug, Clone, Default)]
struct InMemoryTrackerState {
    users: BTreeMap<UserId, User>,
    projects: BTreeMap<ProjectId, Project>,
    tasks: BTreeMap<TaskId, Task>,
    sprints: BTreeMap<SprintId, Sprint>,
    daily_reports: BTreeMap<DailyReportId, DailyReport>,
    sprint_reviews: BTreeMap<SprintReviewId, SprintReview>,
    retrospectives: BTreeMap<RetrospectiveId, Retrospective>,
    sequence: i64,
}

impl InMemoryTrackerStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&InMemoryTrackerState) -> T) -> StoreResult<T> {
        let state = self
            .state
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(f(&state))
    }
}

impl InMemoryTrackerState {
    const fn next_id(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }

    fn apply(&mut self, change: Change, receipt: &mut CommitReceipt) -> StoreResult<()> {
        match change {
            Change::InsertUser(new_user) => {
                if self
                    .users
                    .values()
                    .any(|user| user.external_id == new_user.external_id)
                {
                    return Err(StoreError::conflict(format!(
                        "external user {} is already registered",
                        new_user.external_id
                    )));
                }
                let id = UserId::new(self.next_id());
                self.users.insert(id, User::from_new(id, new_user));
                receipt.record(CreatedRecord::User(id));
            }
            Change::TouchLogin { user, at } => {
                self.user_mut(user)?.last_login = at;
            }
            Change::SetRole {
                user,
                expected,
                role,
            } => {
                let stored = self.user_mut(user)?;
                if stored.role != expected {
                    return Err(StoreError::conflict(format!(
                        "user {user} holds role {} instead of {expected}",
                        stored.role
                    )));
                }
                stored.role = role;
            }
            Change::AwardPoints { user, points } => {
                let stored = self.user_mut(user)?;
                stored.total_points = stored.total_points.saturating_add(u64::from(points));
            }
            Change::InsertProject(new_project) => {
                if !self.users.contains_key(&new_project.created_by) {
                    return Err(StoreError::NotFound(RecordRef::User(
                        new_project.created_by,
                    )));
                }
                let id = ProjectId::new(self.next_id());
                self.projects.insert(id, Project::from_new(id, new_project));
                receipt.record(CreatedRecord::Project(id));
            }
            Change::InsertTask(new_task) => {
                if !self.projects.contains_key(&new_task.project_id) {
                    return Err(StoreError::NotFound(RecordRef::Project(
                        new_task.project_id,
                    )));
                }
                let id = TaskId::new(self.next_id());
                self.tasks.insert(id, Task::from_new(id, new_task));
                receipt.record(CreatedRecord::Task(id));
            }
            Change::UpdateTask { task, expected } => {
                self.expect_task_status(task.id(), expected)?;
                self.tasks.insert(task.id(), task);
            }
            Change::PlanSprint { sprint, tasks } => {
                let id = SprintId::new(self.next_id());
                self.sprints.insert(
                    id,
                    Sprint {
                        id,
                        start_date: sprint.start_date,
                        end_date: None,
                        status: SprintStatus::Active,
                        created_by: sprint.created_by,
                    },
                );
                receipt.record(CreatedRecord::Sprint(id));
                for mut task in tasks {
                    self.expect_task_status(task.id(), TaskStatus::Backlog)?;
                    task.attach_to_sprint(id);
                    self.tasks.insert(task.id(), task);
                }
            }
            Change::CloseSprint {
                sprint,
                closed_on,
                retrospective,
            } => {
                if retrospective.sprint_id != sprint {
                    return Err(StoreError::conflict(format!(
                        "retrospective targets sprint {} while closing sprint {sprint}",
                        retrospective.sprint_id
                    )));
                }
                self.require_sprint(sprint)?;
                self.require_user(retrospective.held_by)?;
                let stored = self
                    .sprints
                    .get_mut(&sprint)
                    .ok_or(StoreError::NotFound(RecordRef::Sprint(sprint)))?;
                if !stored.is_active() {
                    return Err(StoreError::conflict(format!(
                        "sprint {sprint} is already completed"
                    )));
                }
                stored.status = SprintStatus::Completed;
                stored.end_date = Some(closed_on);
                let id = RetrospectiveId::new(self.next_id());
                self.retrospectives.insert(
                    id,
                    Retrospective {
                        id,
                        sprint_id: retrospective.sprint_id,
                        held_by: retrospective.held_by,
                        held_on: retrospective.held_on,
                        discussion: retrospective.discussion,
                    },
                );
                receipt.record(CreatedRecord::Retrospective(id));
            }
            Change::InsertDailyReport(report) => {
                self.require_user(report.user_id)?;
                self.require_sprint(report.sprint_id)?;
                let id = DailyReportId::new(self.next_id());
                self.daily_reports.insert(
                    id,
                    DailyReport {
                        id,
                        user_id: report.user_id,
                        sprint_id: report.sprint_id,
                        report_date: report.report_date,
                        completed: report.completed,
                        planned: report.planned,
                        blockers: report.blockers,
                    },
                );
                receipt.record(CreatedRecord::DailyReport(id));
            }
            Change::InsertSprintReview(review) => {
                self.require_sprint(review.sprint_id())?;
                self.require_user(review.author_id())?;
                let id = SprintReviewId::new(self.next_id());
                self.sprint_reviews
                    .insert(id, SprintReview::from_new(id, review));
                receipt.record(CreatedRecord::SprintReview(id));
            }
        }
        Ok(())
    }

    fn require_user(&self, id: UserId) -> StoreResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::NotFound(RecordRef::User(id)))
        }
    }

    fn require_sprint(&self, id: SprintId) -> StoreResult<()> {
        if self.sprints.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::NotFound(RecordRef::Sprint(id)))
        }
    }

    fn user_mut(&mut self, id: UserId) -> StoreResult<&mut User> {
        self.users
            .get_mut(&id)
            .ok_or(StoreError::NotFound(RecordRef::User(id)))
    }

    fn expect_task_status(&self, id: TaskId, expected: TaskStatus) -> StoreResult<()> {
        let stored = self
            .tasks
            .get(&id)
            .ok_or(StoreError::NotFound(RecordRef::Task(id)))?;
        if stored.status() != expected {
            return Err(StoreError::conflict(format!(
                "task {id} is {} instead of {expected}",
                stored.status()
            )));
        }
        Ok(())
    }
}

/// Returns the `limit` newest records by `(date, id)`.
fn newest_first<T: Clone, K: Ord>(
    records: impl Iterator<Item = T>,
    limit: usize,
    key: impl Fn(&T) -> K,
) -> Vec<T> {
    let mut records: Vec<T> = records.collect();
    records.sort_by(|left, right| key(right).cmp(&key(left)));
    records.truncate(limit);
    records
}

#[async_trait]
impl TrackerStore for InMemoryTrackerStore {
    async fn user(&self, id: UserId) -> StoreResult<Option<User>> {
        self.read(|state| state.users.get(&id).cloned())
    }

    async fn user_by_external_id(
        &self,
        external_id: ExternalUserId,
    ) -> StoreResult<Option<User>> {
        self.read(|state| {
            state
                .users
                .values()
                .find(|user| user.external_id == external_id)
                .cloned()
        })
    }

    async fn users_with_roles(&self, roles: &[Role]) -> StoreResult<Vec<User>> {
        self.read(|state| {
            state
                .users
                .values()
                .filter(|user| roles.contains(&user.role))
                .cloned()
                .collect()
        })
    }

    async fn project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        self.read(|state| state.projects.get(&id).cloned())
    }

    async fn projects(&self, filter: ProjectFilter) -> StoreResult<Vec<Project>> {
        self.read(|state| {
            state
                .projects
                .values()
                .filter(|project| filter.matches(project))
                .cloned()
                .collect()
        })
    }

    async fn task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        self.read(|state| state.tasks.get(&id).cloned())
    }

    async fn tasks(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        self.read(|state| {
            state
                .tasks
                .values()
                .filter(|task| filter.matches(task))
                .cloned()
                .collect()
        })
    }

    async fn sprint(&self, id: SprintId) -> StoreResult<Option<Sprint>> {
        self.read(|state| state.sprints.get(&id).cloned())
    }

    async fn sprints_with_status(&self, status: SprintStatus) -> StoreResult<Vec<Sprint>> {
        self.read(|state| {
            state
                .sprints
                .values()
                .filter(|sprint| sprint.status == status)
                .cloned()
                .collect()
        })
    }

    async fn recent_daily_reports(&self, limit: usize) -> StoreResult<Vec<DailyReport>> {
        self.read(|state| {
            newest_first(state.daily_reports.values().cloned(), limit, |report| {
                (report.report_date, report.id)
            })
        })
    }

    async fn recent_sprint_reviews(&self, limit: usize) -> StoreResult<Vec<SprintReview>> {
        self.read(|state| {
            newest_first(state.sprint_reviews.values().cloned(), limit, |review| {
                (review.review_date, review.id)
            })
        })
    }

    async fn retrospectives(&self, sprint: SprintId) -> StoreResult<Vec<Retrospective>> {
        self.read(|state| {
            state
                .retrospectives
                .values()
                .filter(|retrospective| retrospective.sprint_id == sprint)
                .cloned()
                .collect()
        })
    }

    async fn commit(&self, unit: UnitOfWork) -> StoreResult<CommitReceipt> {
        let mut state = self
            .state
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))?;
        let mut staged = state.clone();
        let mut receipt = CommitReceipt::new();
        for change in unit.changes().iter().cloned() {
            staged.apply(change, &mut receipt)?;
        }
        *state = staged;
        Ok(receipt)
    }
}
