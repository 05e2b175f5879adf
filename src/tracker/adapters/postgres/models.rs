//! Diesel row models for tracker persistence.

use super::schema::{daily_reports, projects, retrospectives, sprint_reviews, sprints, tasks, users};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for users.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Internal user identifier.
    pub id: i64,
    /// Identity on the chat transport.
    pub external_id: i64,
    /// Display name.
    pub name: String,
    /// Role name.
    pub role: String,
    /// Registration timestamp.
    pub joined_at: DateTime<Utc>,
    /// Most recent login timestamp.
    pub last_login: DateTime<Utc>,
    /// Credited story points.
    pub total_points: i64,
}

/// Insert model for users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Identity on the chat transport.
    pub external_id: i64,
    /// Display name.
    pub name: String,
    /// Role name.
    pub role: String,
    /// Registration timestamp.
    pub joined_at: DateTime<Utc>,
    /// First login timestamp.
    pub last_login: DateTime<Utc>,
    /// Initial story points.
    pub total_points: i64,
}

/// Query result row for projects.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Internal project identifier.
    pub id: i64,
    /// Project name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Creating user.
    pub created_by: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for projects.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Project name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Creating user.
    pub created_by: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for sprints.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sprints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SprintRow {
    /// Internal sprint identifier.
    pub id: i64,
    /// Opening day.
    pub start_date: NaiveDate,
    /// Closing day.
    pub end_date: Option<NaiveDate>,
    /// Status name.
    pub status: String,
    /// Opening user.
    pub created_by: i64,
}

/// Insert model for sprints.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sprints)]
pub struct NewSprintRow {
    /// Opening day.
    pub start_date: NaiveDate,
    /// Status name.
    pub status: String,
    /// Opening user.
    pub created_by: i64,
}

/// Query result row for tasks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: i64,
    /// Owning project.
    pub project_id: i64,
    /// Containing sprint.
    pub sprint_id: Option<i64>,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Assigned user.
    pub assignee: Option<i64>,
    /// Status name.
    pub status: String,
    /// Story-point estimate.
    pub story_points: Option<i32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Approval flag.
    pub reviewed: bool,
    /// Last rejection reason.
    pub rejection_reason: Option<String>,
}

/// Insert model for backlog tasks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Owning project.
    pub project_id: i64,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Status name.
    pub status: String,
    /// Story-point estimate.
    pub story_points: Option<i32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Approval flag.
    pub reviewed: bool,
}

/// Changeset written when a task is updated or planned.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Containing sprint.
    pub sprint_id: Option<i64>,
    /// Assigned user.
    pub assignee: Option<i64>,
    /// Status name.
    pub status: String,
    /// Approval flag.
    pub reviewed: bool,
    /// Last rejection reason.
    pub rejection_reason: Option<String>,
}

/// Query result row for daily reports.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = daily_reports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DailyReportRow {
    /// Internal report identifier.
    pub id: i64,
    /// Reporting user.
    pub user_id: i64,
    /// Active sprint.
    pub sprint_id: i64,
    /// Day of the report.
    pub report_date: NaiveDate,
    /// Finished work.
    pub completed: String,
    /// Planned work.
    pub planned: String,
    /// Blockers.
    pub blockers: String,
}

/// Insert model for daily reports.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = daily_reports)]
pub struct NewDailyReportRow {
    /// Reporting user.
    pub user_id: i64,
    /// Active sprint.
    pub sprint_id: i64,
    /// Day of the report.
    pub report_date: NaiveDate,
    /// Finished work.
    pub completed: String,
    /// Planned work.
    pub planned: String,
    /// Blockers.
    pub blockers: String,
}

/// Query result row for sprint reviews.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sprint_reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SprintReviewRow {
    /// Internal review identifier.
    pub id: i64,
    /// Reviewed sprint.
    pub sprint_id: i64,
    /// Author.
    pub author_id: i64,
    /// Day of the review.
    pub review_date: NaiveDate,
    /// Notes.
    pub notes: String,
    /// Completion percentage.
    pub completion_percentage: f64,
}

/// Insert model for sprint reviews.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sprint_reviews)]
pub struct NewSprintReviewRow {
    /// Reviewed sprint.
    pub sprint_id: i64,
    /// Author.
    pub author_id: i64,
    /// Day of the review.
    pub review_date: NaiveDate,
    /// Notes.
    pub notes: String,
    /// Completion percentage.
    pub completion_percentage: f64,
}

/// Query result row for retrospectives.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = retrospectives)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RetrospectiveRow {
    /// Internal retrospective identifier.
    pub id: i64,
    /// Closed sprint.
    pub sprint_id: i64,
    /// Closing user.
    pub held_by: i64,
    /// Day of the retrospective.
    pub held_on: NaiveDate,
    /// Discussion summary.
    pub discussion: String,
}

/// Insert model for retrospectives.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = retrospectives)]
pub struct NewRetrospectiveRow {
    /// Closed sprint.
    pub sprint_id: i64,
    /// Closing user.
    pub held_by: i64,
    /// Day of the retrospective.
    pub held_on: NaiveDate,
    /// Discussion summary.
    pub discussion: String,
}
