//! Service layer for the task and sprint lifecycle.

use crate::access::{AccessDenied, Action, authorize};
use crate::tracker::{
    domain::{
        ExternalUserId, NewProject, NewSprint, NewTask, NewUser, Project, ProjectId, RecordRef,
        SprintId, Task, TaskId, TaskStatus, TrackerDomainError, User, UserId, parse_backlog,
    },
    ports::{
        Change, ProjectFilter, StoreError, TaskFilter, TrackerStore, UnitOfWork,
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Description stored on projects created through the chat interface.
pub const CHAT_PROJECT_DESCRIPTION: &str = "Created via chat";

/// Service-level errors for lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The acting user's role does not permit the operation.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TrackerDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A referenced record does not resolve.
    #[error("{0} not found")]
    NotFound(RecordRef),
    /// None of the user's tasks belongs to an active sprint.
    #[error("user {0} has no task in an active sprint")]
    NoActiveSprint(UserId),
}

impl LifecycleError {
    /// Returns `true` when the failure came from a missing record, either
    /// detected by the service or reported by the store during commit.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Store(StoreError::NotFound(_)))
    }
}

/// Result type for lifecycle service operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Outcome of a `/start` registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// The registered or returning user.
    pub user: User,
    /// `true` when the user was created by this call.
    pub created: bool,
}

/// Outcome of an approved review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approval {
    /// The completed task.
    pub task: Task,
    /// Points credited to the assignee.
    pub points_awarded: u32,
}

/// Task and sprint lifecycle orchestration service.
///
/// Every mutating operation authorizes the acting user's current role before
/// touching the store and commits its changes as one unit of work.
#[derive(Clone)]
pub struct TrackerService<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync,
{
    pub(super) store: Arc<S>,
    pub(super) clock: Arc<C>,
}

impl<S, C> TrackerService<S, C>
where
    S: TrackerStore,
    C: Clock + Send + Sync,
{
    /// Creates a new lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    pub(super) fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    /// Registers an unknown chat identity as a developer, or refreshes the
    /// last-login time of a known one.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the store rejects the change.
    pub async fn register(
        &self,
        external_id: ExternalUserId,
        display_name: &str,
    ) -> LifecycleResult<Registration> {
        let now = self.clock.utc();
        if let Some(mut user) = self.store.user_by_external_id(external_id).await? {
            self.store
                .commit(UnitOfWork::single(Change::TouchLogin { user: user.id, at: now }))
                .await?;
            user.last_login = now;
            debug!(user_id = %user.id, "returning user logged in");
            return Ok(Registration {
                user,
                created: false,
            });
        }

        let new_user = NewUser::developer(external_id, display_name.trim(), now);
        let receipt = self
            .store
            .commit(UnitOfWork::single(Change::InsertUser(new_user.clone())))
            .await?;
        let id = receipt.user().ok_or(StoreError::IncompleteReceipt("user"))?;
        info!(user_id = %id, %external_id, "registered new user");
        Ok(Registration {
            user: User::from_new(id, new_user),
            created: true,
        })
    }

    /// Looks up a user by chat identity.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the lookup fails.
    pub async fn find_user(&self, external_id: ExternalUserId) -> LifecycleResult<Option<User>> {
        Ok(self.store.user_by_external_id(external_id).await?)
    }

    /// Looks up a user by internal id.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the lookup fails.
    pub async fn user(&self, id: UserId) -> LifecycleResult<Option<User>> {
        Ok(self.store.user(id).await?)
    }

    /// Creates a project owned by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] for developers,
    /// [`LifecycleError::Domain`] for a blank name, or
    /// [`LifecycleError::Store`] when the commit fails.
    pub async fn create_project(&self, actor: &User, name: &str) -> LifecycleResult<Project> {
        authorize(actor.role, Action::CreateProject)?;
        let new_project =
            NewProject::new(name, CHAT_PROJECT_DESCRIPTION, actor.id, &*self.clock)?;
        let receipt = self
            .store
            .commit(UnitOfWork::single(Change::InsertProject(new_project.clone())))
            .await?;
        let id = receipt
            .project()
            .ok_or(StoreError::IncompleteReceipt("project"))?;
        info!(project_id = %id, user_id = %actor.id, "created project");
        Ok(Project::from_new(id, new_project))
    }

    /// Lists projects created by `user`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the lookup fails.
    pub async fn projects_created_by(&self, user: UserId) -> LifecycleResult<Vec<Project>> {
        Ok(self.store.projects(ProjectFilter::created_by(user)).await?)
    }

    /// Lists every project.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the lookup fails.
    pub async fn all_projects(&self) -> LifecycleResult<Vec<Project>> {
        Ok(self.store.projects(ProjectFilter::all()).await?)
    }

    /// Resolves a project, failing when it no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotFound`] for a stale id.
    pub async fn project(&self, id: ProjectId) -> LifecycleResult<Project> {
        self.store
            .project(id)
            .await?
            .ok_or(LifecycleError::NotFound(RecordRef::Project(id)))
    }

    /// Parses `text` as backlog lines and creates one backlog task per
    /// well-formed line, returning the number created.
    ///
    /// Malformed lines are skipped. Nothing is committed when no line parses.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] for developers,
    /// [`LifecycleError::NotFound`] for a stale project, or
    /// [`LifecycleError::Store`] when the commit fails.
    pub async fn import_backlog(
        &self,
        actor: &User,
        project_id: ProjectId,
        text: &str,
    ) -> LifecycleResult<usize> {
        authorize(actor.role, Action::AddBacklogTasks)?;
        let project = self.project(project_id).await?;
        let unit: UnitOfWork = parse_backlog(text)
            .into_iter()
            .map(|entry| {
                Change::InsertTask(NewTask::backlog(
                    project.id,
                    entry.title,
                    entry.story_points,
                    &*self.clock,
                ))
            })
            .collect();
        if unit.is_empty() {
            debug!(project_id = %project.id, "backlog import contained no valid lines");
            return Ok(0);
        }
        let created = self.store.commit(unit).await?.tasks().len();
        info!(project_id = %project.id, created, "imported backlog tasks");
        Ok(created)
    }

    /// Lists backlog tasks of a project.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the lookup fails.
    pub async fn backlog(&self, project_id: ProjectId) -> LifecycleResult<Vec<Task>> {
        let filter = TaskFilter::new()
            .in_project(project_id)
            .with_status(TaskStatus::Backlog);
        Ok(self.store.tasks(filter).await?)
    }

    /// Opens an active sprint holding `task_ids`, each assigned to `actor`
    /// and moved to `NotStarted`, in one commit.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Domain`] for an empty selection,
    /// [`LifecycleError::NotFound`] when a task vanished or left the
    /// backlog, or [`LifecycleError::Store`] when the commit fails.
    pub async fn plan_sprint(&self, actor: &User, task_ids: &[TaskId]) -> LifecycleResult<SprintId> {
        authorize(actor.role, Action::CreateSprintFromBacklog)?;
        if task_ids.is_empty() {
            return Err(TrackerDomainError::EmptySprint.into());
        }
        let mut planned = Vec::with_capacity(task_ids.len());
        for task_id in task_ids {
            let mut task = self.task(*task_id).await?;
            if task.status() != TaskStatus::Backlog {
                return Err(LifecycleError::NotFound(RecordRef::Task(task.id())));
            }
            task.plan_for(actor.id)?;
            planned.push(task);
        }
        let change = Change::PlanSprint {
            sprint: NewSprint::active(actor.id, self.today()),
            tasks: planned,
        };
        let receipt = self.store.commit(UnitOfWork::single(change)).await?;
        let sprint_id = receipt
            .sprint()
            .ok_or(StoreError::IncompleteReceipt("sprint"))?;
        info!(%sprint_id, user_id = %actor.id, tasks = task_ids.len(), "opened sprint");
        Ok(sprint_id)
    }

    /// Resolves a task, failing when it no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotFound`] for a stale id.
    pub async fn task(&self, id: TaskId) -> LifecycleResult<Task> {
        self.store
            .task(id)
            .await?
            .ok_or(LifecycleError::NotFound(RecordRef::Task(id)))
    }

    /// Lists tasks assigned to `user` with the given status.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the lookup fails.
    pub async fn tasks_assigned(
        &self,
        user: UserId,
        status: TaskStatus,
    ) -> LifecycleResult<Vec<Task>> {
        let filter = TaskFilter::new().assigned_to(user).with_status(status);
        Ok(self.store.tasks(filter).await?)
    }

    /// Lists every task assigned to `user` that is not completed.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the lookup fails.
    pub async fn open_tasks(&self, user: UserId) -> LifecycleResult<Vec<Task>> {
        let tasks = self.store.tasks(TaskFilter::new().assigned_to(user)).await?;
        Ok(tasks
            .into_iter()
            .filter(|task| !task.status().is_terminal())
            .collect())
    }

    /// Starts one of the actor's planned tasks.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Domain`] when the task is not the actor's or
    /// not `NotStarted`, [`LifecycleError::NotFound`] for a stale id, or
    /// [`LifecycleError::Store`] when the commit fails.
    pub async fn start_task(&self, actor: &User, task_id: TaskId) -> LifecycleResult<Task> {
        authorize(actor.role, Action::StartOwnTask)?;
        self.advance_own_task(actor, task_id, Task::start).await
    }

    /// Hands one of the actor's in-progress tasks over to review.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Domain`] when the task is not the actor's or
    /// not `InProgress`, [`LifecycleError::NotFound`] for a stale id, or
    /// [`LifecycleError::Store`] when the commit fails.
    pub async fn submit_for_review(&self, actor: &User, task_id: TaskId) -> LifecycleResult<Task> {
        authorize(actor.role, Action::SubmitTaskForReview)?;
        self.advance_own_task(actor, task_id, Task::submit_for_review)
            .await
    }

    async fn advance_own_task(
        &self,
        actor: &User,
        task_id: TaskId,
        transition: fn(&mut Task) -> Result<(), TrackerDomainError>,
    ) -> LifecycleResult<Task> {
        let mut task = self.task(task_id).await?;
        if !task.is_assigned_to(actor.id) {
            return Err(TrackerDomainError::NotAssignee {
                task_id,
                user_id: actor.id,
            }
            .into());
        }
        let expected = task.status();
        transition(&mut task)?;
        self.store
            .commit(UnitOfWork::single(Change::UpdateTask {
                task: task.clone(),
                expected,
            }))
            .await?;
        info!(%task_id, from = %expected, to = %task.status(), "task advanced");
        Ok(task)
    }

    /// Lists tasks awaiting review that `reviewer` may review.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the lookup fails.
    pub async fn reviewable_tasks(&self, reviewer: UserId) -> LifecycleResult<Vec<Task>> {
        let filter = TaskFilter::new()
            .with_status(TaskStatus::InReview)
            .not_assigned_to(reviewer);
        Ok(self.store.tasks(filter).await?)
    }

    /// Approves a task under review and credits its story points to the
    /// assignee in the same commit.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Domain`] for a self-review,
    /// [`LifecycleError::NotFound`] for a stale id or a task that is no
    /// longer `InReview`, or [`LifecycleError::Store`] when the commit fails.
    pub async fn approve_task(&self, reviewer: &User, task_id: TaskId) -> LifecycleResult<Approval> {
        let mut task = self.reviewable_task(reviewer, task_id).await?;
        let expected = task.status();
        task.approve()?;

        let points_awarded = task.story_points().unwrap_or_default();
        let mut unit = UnitOfWork::single(Change::UpdateTask {
            task: task.clone(),
            expected,
        });
        if let Some(assignee) = task.assignee() {
            unit.push(Change::AwardPoints {
                user: assignee,
                points: points_awarded,
            });
        }
        self.store.commit(unit).await?;
        info!(%task_id, reviewer = %reviewer.id, points_awarded, "task approved");
        Ok(Approval {
            task,
            points_awarded,
        })
    }

    /// Sends a task under review back to `InProgress` with a reason.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Domain`] for a blank reason or a
    /// self-review, [`LifecycleError::NotFound`] for a stale id or a task
    /// that is no longer `InReview`, or [`LifecycleError::Store`] when the
    /// commit fails.
    pub async fn reject_task(
        &self,
        reviewer: &User,
        task_id: TaskId,
        reason: &str,
    ) -> LifecycleResult<Task> {
        let mut task = self.reviewable_task(reviewer, task_id).await?;
        let expected = task.status();
        task.reject(reason)?;
        self.store
            .commit(UnitOfWork::single(Change::UpdateTask {
                task: task.clone(),
                expected,
            }))
            .await?;
        info!(%task_id, reviewer = %reviewer.id, "task rejected");
        Ok(task)
    }

    async fn reviewable_task(&self, reviewer: &User, task_id: TaskId) -> LifecycleResult<Task> {
        authorize(reviewer.role, Action::ReviewOthersTasks)?;
        let task = self.task(task_id).await?;
        if task.is_assigned_to(reviewer.id) {
            return Err(TrackerDomainError::SelfReview {
                task_id,
                user_id: reviewer.id,
            }
            .into());
        }
        if task.status() != TaskStatus::InReview {
            return Err(LifecycleError::NotFound(RecordRef::Task(task_id)));
        }
        Ok(task)
    }
}
