//! `PostgreSQL` implementation of the tracker store.

use super::{
    models::{
        DailyReportRow, NewDailyReportRow, NewProjectRow, NewRetrospectiveRow, NewSprintReviewRow,
        NewSprintRow, NewTaskRow, NewUserRow, ProjectRow, RetrospectiveRow, SprintReviewRow,
        SprintRow, TaskChangeset, TaskRow, UserRow,
    },
    schema::{daily_reports, projects, retrospectives, sprint_reviews, sprints, tasks, users},
};
use crate::access::Role;
use crate::tracker::{
    domain::{
        DailyReport, DailyReportId, ExternalUserId, NewProject, NewTask, NewUser,
        PersistedTaskData, Project, ProjectId, RecordRef, Retrospective, RetrospectiveId, Sprint,
        SprintId, SprintReview, SprintReviewId, SprintStatus, Task, TaskId, TaskStatus, User,
        UserId,
    },
    ports::{
        Change, CommitReceipt, CreatedRecord, ProjectFilter, StoreError, StoreResult, TaskFilter,
        TrackerStore, UnitOfWork,
    },
};
use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the tracker store.
pub type TrackerPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed tracker store.
#[derive(Debug, Clone)]
pub struct PostgresTrackerStore {
    pool: TrackerPgPool,
}

impl PostgresTrackerStore {
    /// Creates a store from an existing connection pool.
    #[must_use]
    pub const fn new(pool: TrackerPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool for `database_url` and wraps it in a store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the pool cannot establish its
    /// initial connections.
    pub fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_connections)
            .build(manager)
            .map_err(StoreError::persistence)?;
        Ok(Self::new(pool))
    }

    async fn run_blocking<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(StoreError::persistence)?
    }
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::SerializationFailure,
                ref info,
            ) => Self::conflict(info.message()),
            _ => Self::persistence(err),
        }
    }
}

#[async_trait]
impl TrackerStore for PostgresTrackerStore {
    async fn user(&self, id: UserId) -> StoreResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .find(id.value())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn user_by_external_id(
        &self,
        external_id: ExternalUserId,
    ) -> StoreResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::external_id.eq(external_id.value()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn users_with_roles(&self, roles: &[Role]) -> StoreResult<Vec<User>> {
        let role_names: Vec<&'static str> = roles.iter().map(|role| role.as_str()).collect();
        self.run_blocking(move |connection| {
            users::table
                .filter(users::role.eq_any(role_names))
                .order(users::id.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)?
                .into_iter()
                .map(row_to_user)
                .collect()
        })
        .await
    }

    async fn project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.value())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()?;
            Ok(row.map(row_to_project))
        })
        .await
    }

    async fn projects(&self, filter: ProjectFilter) -> StoreResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let mut query = projects::table
                .select(ProjectRow::as_select())
                .order(projects::id.asc())
                .into_boxed();
            if let Some(user) = filter.created_by {
                query = query.filter(projects::created_by.eq(user.value()));
            }
            let rows = query.load::<ProjectRow>(connection)?;
            Ok(rows.into_iter().map(row_to_project).collect())
        })
        .await
    }

    async fn task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn tasks(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .select(TaskRow::as_select())
                .order(tasks::id.asc())
                .into_boxed();
            if let Some(project) = filter.project {
                query = query.filter(tasks::project_id.eq(project.value()));
            }
            if let Some(sprint) = filter.sprint {
                query = query.filter(tasks::sprint_id.eq(sprint.value()));
            }
            if let Some(user) = filter.assignee {
                query = query.filter(tasks::assignee.eq(user.value()));
            }
            if let Some(user) = filter.not_assignee {
                query = query.filter(tasks::assignee.is_distinct_from(user.value()));
            }
            if let Some(status) = filter.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            query
                .load::<TaskRow>(connection)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn sprint(&self, id: SprintId) -> StoreResult<Option<Sprint>> {
        self.run_blocking(move |connection| {
            let row = sprints::table
                .find(id.value())
                .select(SprintRow::as_select())
                .first::<SprintRow>(connection)
                .optional()?;
            row.map(row_to_sprint).transpose()
        })
        .await
    }

    async fn sprints_with_status(&self, status: SprintStatus) -> StoreResult<Vec<Sprint>> {
        self.run_blocking(move |connection| {
            sprints::table
                .filter(sprints::status.eq(status.as_str()))
                .order(sprints::id.asc())
                .select(SprintRow::as_select())
                .load::<SprintRow>(connection)?
                .into_iter()
                .map(row_to_sprint)
                .collect()
        })
        .await
    }

    async fn recent_daily_reports(&self, limit: usize) -> StoreResult<Vec<DailyReport>> {
        let row_limit = i64::try_from(limit).map_err(StoreError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = daily_reports::table
                .order((daily_reports::report_date.desc(), daily_reports::id.desc()))
                .limit(row_limit)
                .select(DailyReportRow::as_select())
                .load::<DailyReportRow>(connection)?;
            Ok(rows.into_iter().map(row_to_daily_report).collect())
        })
        .await
    }

    async fn recent_sprint_reviews(&self, limit: usize) -> StoreResult<Vec<SprintReview>> {
        let row_limit = i64::try_from(limit).map_err(StoreError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = sprint_reviews::table
                .order((sprint_reviews::review_date.desc(), sprint_reviews::id.desc()))
                .limit(row_limit)
                .select(SprintReviewRow::as_select())
                .load::<SprintReviewRow>(connection)?;
            Ok(rows.into_iter().map(row_to_sprint_review).collect())
        })
        .await
    }

    async fn retrospectives(&self, sprint: SprintId) -> StoreResult<Vec<Retrospective>> {
        self.run_blocking(move |connection| {
            let rows = retrospectives::table
                .filter(retrospectives::sprint_id.eq(sprint.value()))
                .order(retrospectives::id.asc())
                .select(RetrospectiveRow::as_select())
                .load::<RetrospectiveRow>(connection)?;
            Ok(rows.into_iter().map(row_to_retrospective).collect())
        })
        .await
    }

    async fn commit(&self, unit: UnitOfWork) -> StoreResult<CommitReceipt> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, StoreError, _>(|tx_conn| {
                let mut receipt = CommitReceipt::new();
                for change in unit.changes() {
                    apply_change(tx_conn, change, &mut receipt)?;
                }
                Ok(receipt)
            })
        })
        .await
    }
}

fn apply_change(
    connection: &mut PgConnection,
    change: &Change,
    receipt: &mut CommitReceipt,
) -> StoreResult<()> {
    match change {
        Change::InsertUser(new_user) => {
            let id = insert_user(connection, new_user)?;
            receipt.record(CreatedRecord::User(id));
        }
        Change::TouchLogin { user, at } => {
            let updated = diesel::update(users::table.find(user.value()))
                .set(users::last_login.eq(*at))
                .execute(connection)?;
            require_updated(connection, updated, RecordRef::User(*user), "")?;
        }
        Change::SetRole {
            user,
            expected,
            role,
        } => {
            let updated = diesel::update(
                users::table
                    .find(user.value())
                    .filter(users::role.eq(expected.as_str())),
            )
            .set(users::role.eq(role.as_str()))
            .execute(connection)?;
            require_updated(
                connection,
                updated,
                RecordRef::User(*user),
                &format!("user {user} no longer holds role {expected}"),
            )?;
        }
        Change::AwardPoints { user, points } => {
            let updated = diesel::update(users::table.find(user.value()))
                .set(users::total_points.eq(users::total_points + i64::from(*points)))
                .execute(connection)?;
            require_updated(connection, updated, RecordRef::User(*user), "")?;
        }
        Change::InsertProject(new_project) => {
            let id = insert_project(connection, new_project)?;
            receipt.record(CreatedRecord::Project(id));
        }
        Change::InsertTask(new_task) => {
            let id = insert_task(connection, new_task)?;
            receipt.record(CreatedRecord::Task(id));
        }
        Change::UpdateTask { task, expected } => {
            update_task(connection, task, task.sprint_id(), *expected)?;
        }
        Change::PlanSprint { sprint, tasks } => {
            let row = NewSprintRow {
                start_date: sprint.start_date,
                status: SprintStatus::Active.as_str().to_owned(),
                created_by: sprint.created_by.value(),
            };
            let id = diesel::insert_into(sprints::table)
                .values(&row)
                .returning(sprints::id)
                .get_result::<i64>(connection)?;
            let sprint_id = SprintId::new(id);
            receipt.record(CreatedRecord::Sprint(sprint_id));
            for task in tasks {
                update_task(connection, task, Some(sprint_id), TaskStatus::Backlog)?;
            }
        }
        Change::CloseSprint {
            sprint,
            closed_on,
            retrospective,
        } => {
            if retrospective.sprint_id != *sprint {
                return Err(StoreError::conflict(format!(
                    "retrospective targets sprint {} while closing sprint {sprint}",
                    retrospective.sprint_id
                )));
            }
            let updated = diesel::update(
                sprints::table
                    .find(sprint.value())
                    .filter(sprints::status.eq(SprintStatus::Active.as_str())),
            )
            .set((
                sprints::status.eq(SprintStatus::Completed.as_str()),
                sprints::end_date.eq(Some(*closed_on)),
            ))
            .execute(connection)?;
            require_updated(
                connection,
                updated,
                RecordRef::Sprint(*sprint),
                &format!("sprint {sprint} is already completed"),
            )?;
            let row = NewRetrospectiveRow {
                sprint_id: retrospective.sprint_id.value(),
                held_by: retrospective.held_by.value(),
                held_on: retrospective.held_on,
                discussion: retrospective.discussion.clone(),
            };
            let id = diesel::insert_into(retrospectives::table)
                .values(&row)
                .returning(retrospectives::id)
                .get_result::<i64>(connection)?;
            receipt.record(CreatedRecord::Retrospective(RetrospectiveId::new(id)));
        }
        Change::InsertDailyReport(report) => {
            let row = NewDailyReportRow {
                user_id: report.user_id.value(),
                sprint_id: report.sprint_id.value(),
                report_date: report.report_date,
                completed: report.completed.clone(),
                planned: report.planned.clone(),
                blockers: report.blockers.clone(),
            };
            let id = diesel::insert_into(daily_reports::table)
                .values(&row)
                .returning(daily_reports::id)
                .get_result::<i64>(connection)?;
            receipt.record(CreatedRecord::DailyReport(DailyReportId::new(id)));
        }
        Change::InsertSprintReview(review) => {
            let row = NewSprintReviewRow {
                sprint_id: review.sprint_id().value(),
                author_id: review.author_id().value(),
                review_date: review.review_date(),
                notes: review.notes().to_owned(),
                completion_percentage: review.completion_percentage(),
            };
            let id = diesel::insert_into(sprint_reviews::table)
                .values(&row)
                .returning(sprint_reviews::id)
                .get_result::<i64>(connection)?;
            receipt.record(CreatedRecord::SprintReview(SprintReviewId::new(id)));
        }
    }
    Ok(())
}

fn insert_user(connection: &mut PgConnection, new_user: &NewUser) -> StoreResult<UserId> {
    let row = NewUserRow {
        external_id: new_user.external_id.value(),
        name: new_user.name.clone(),
        role: new_user.role.as_str().to_owned(),
        joined_at: new_user.joined_at,
        last_login: new_user.joined_at,
        total_points: 0,
    };
    let id = diesel::insert_into(users::table)
        .values(&row)
        .returning(users::id)
        .get_result::<i64>(connection)?;
    Ok(UserId::new(id))
}

fn insert_project(
    connection: &mut PgConnection,
    new_project: &NewProject,
) -> StoreResult<ProjectId> {
    if !record_exists(connection, RecordRef::User(new_project.created_by))? {
        return Err(StoreError::NotFound(RecordRef::User(new_project.created_by)));
    }
    let row = NewProjectRow {
        name: new_project.name.clone(),
        description: new_project.description.clone(),
        created_by: new_project.created_by.value(),
        created_at: new_project.created_at,
    };
    let id = diesel::insert_into(projects::table)
        .values(&row)
        .returning(projects::id)
        .get_result::<i64>(connection)?;
    Ok(ProjectId::new(id))
}

fn insert_task(connection: &mut PgConnection, new_task: &NewTask) -> StoreResult<TaskId> {
    if !record_exists(connection, RecordRef::Project(new_task.project_id))? {
        return Err(StoreError::NotFound(RecordRef::Project(new_task.project_id)));
    }
    let row = NewTaskRow {
        project_id: new_task.project_id.value(),
        title: new_task.title.clone(),
        description: new_task.description.clone(),
        status: TaskStatus::Backlog.as_str().to_owned(),
        story_points: points_to_column(new_task.story_points)?,
        created_at: new_task.created_at,
        reviewed: false,
    };
    let id = diesel::insert_into(tasks::table)
        .values(&row)
        .returning(tasks::id)
        .get_result::<i64>(connection)?;
    Ok(TaskId::new(id))
}

fn update_task(
    connection: &mut PgConnection,
    task: &Task,
    sprint_id: Option<SprintId>,
    expected: TaskStatus,
) -> StoreResult<()> {
    let changeset = TaskChangeset {
        sprint_id: sprint_id.map(SprintId::value),
        assignee: task.assignee().map(UserId::value),
        status: task.status().as_str().to_owned(),
        reviewed: task.reviewed(),
        rejection_reason: task.rejection_reason().map(str::to_owned),
    };
    let updated = diesel::update(
        tasks::table
            .find(task.id().value())
            .filter(tasks::status.eq(expected.as_str())),
    )
    .set(&changeset)
    .execute(connection)?;
    require_updated(
        connection,
        updated,
        RecordRef::Task(task.id()),
        &format!("task {} is no longer {expected}", task.id()),
    )
}

/// Distinguishes a missing row from a failed expectation after an update
/// that matched nothing.
fn require_updated(
    connection: &mut PgConnection,
    updated: usize,
    record: RecordRef,
    conflict: &str,
) -> StoreResult<()> {
    if updated > 0 {
        return Ok(());
    }
    if record_exists(connection, record)? {
        Err(StoreError::conflict(conflict))
    } else {
        Err(StoreError::NotFound(record))
    }
}

fn record_exists(connection: &mut PgConnection, record: RecordRef) -> StoreResult<bool> {
    let found: bool = match record {
        RecordRef::User(id) => {
            diesel::select(exists(users::table.find(id.value()))).get_result(connection)?
        }
        RecordRef::Project(id) => {
            diesel::select(exists(projects::table.find(id.value()))).get_result(connection)?
        }
        RecordRef::Sprint(id) => {
            diesel::select(exists(sprints::table.find(id.value()))).get_result(connection)?
        }
        RecordRef::Task(id) => {
            diesel::select(exists(tasks::table.find(id.value()))).get_result(connection)?
        }
    };
    Ok(found)
}

pub(super) fn points_to_column(points: Option<u32>) -> StoreResult<Option<i32>> {
    points
        .map(i32::try_from)
        .transpose()
        .map_err(StoreError::persistence)
}

pub(super) fn points_from_column(points: Option<i32>) -> StoreResult<Option<u32>> {
    points
        .map(u32::try_from)
        .transpose()
        .map_err(StoreError::persistence)
}

pub(super) fn row_to_user(row: UserRow) -> StoreResult<User> {
    let role = Role::try_from(row.role.as_str()).map_err(StoreError::persistence)?;
    let total_points = u64::try_from(row.total_points).map_err(StoreError::persistence)?;
    Ok(User {
        id: UserId::new(row.id),
        external_id: ExternalUserId::new(row.external_id),
        name: row.name,
        role,
        joined_at: row.joined_at,
        last_login: row.last_login,
        total_points,
    })
}

fn row_to_project(row: ProjectRow) -> Project {
    Project {
        id: ProjectId::new(row.id),
        name: row.name,
        description: row.description,
        created_by: UserId::new(row.created_by),
        created_at: row.created_at,
    }
}

pub(super) fn row_to_sprint(row: SprintRow) -> StoreResult<Sprint> {
    let status = SprintStatus::try_from(row.status.as_str()).map_err(StoreError::persistence)?;
    Ok(Sprint {
        id: SprintId::new(row.id),
        start_date: row.start_date,
        end_date: row.end_date,
        status,
        created_by: UserId::new(row.created_by),
    })
}

pub(super) fn row_to_task(row: TaskRow) -> StoreResult<Task> {
    let status = TaskStatus::try_from(row.status.as_str()).map_err(StoreError::persistence)?;
    let story_points = points_from_column(row.story_points)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(row.id),
        project_id: ProjectId::new(row.project_id),
        sprint_id: row.sprint_id.map(SprintId::new),
        title: row.title,
        description: row.description,
        assignee: row.assignee.map(UserId::new),
        status,
        story_points,
        created_at: row.created_at,
        reviewed: row.reviewed,
        rejection_reason: row.rejection_reason,
    }))
}

fn row_to_daily_report(row: DailyReportRow) -> DailyReport {
    DailyReport {
        id: DailyReportId::new(row.id),
        user_id: UserId::new(row.user_id),
        sprint_id: SprintId::new(row.sprint_id),
        report_date: row.report_date,
        completed: row.completed,
        planned: row.planned,
        blockers: row.blockers,
    }
}

fn row_to_sprint_review(row: SprintReviewRow) -> SprintReview {
    SprintReview {
        id: SprintReviewId::new(row.id),
        sprint_id: SprintId::new(row.sprint_id),
        author_id: UserId::new(row.author_id),
        review_date: row.review_date,
        notes: row.notes,
        completion_percentage: row.completion_percentage,
    }
}

fn row_to_retrospective(row: RetrospectiveRow) -> Retrospective {
    Retrospective {
        id: RetrospectiveId::new(row.id),
        sprint_id: SprintId::new(row.sprint_id),
        held_by: UserId::new(row.held_by),
        held_on: row.held_on,
        discussion: row.discussion,
    }
}
