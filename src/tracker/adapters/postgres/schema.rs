//! Diesel schema for tracker persistence.

diesel::table! {
    /// Registered chat users.
    users (id) {
        /// Internal user identifier.
        id -> Int8,
        /// Identity on the chat transport.
        external_id -> Int8,
        /// Display name.
        name -> Text,
        /// Current role.
        #[max_length = 32]
        role -> Varchar,
        /// Registration timestamp.
        joined_at -> Timestamptz,
        /// Most recent login timestamp.
        last_login -> Timestamptz,
        /// Story points credited through approvals.
        total_points -> Int8,
    }
}

diesel::table! {
    /// Projects owning task backlogs.
    projects (id) {
        /// Internal project identifier.
        id -> Int8,
        /// Project name.
        #[max_length = 255]
        name -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Creating user.
        created_by -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Sprints grouping planned tasks.
    sprints (id) {
        /// Internal sprint identifier.
        id -> Int8,
        /// Opening day.
        start_date -> Date,
        /// Closing day.
        end_date -> Nullable<Date>,
        /// Sprint lifecycle status.
        #[max_length = 32]
        status -> Varchar,
        /// Opening user.
        created_by -> Int8,
    }
}

diesel::table! {
    /// Backlog and sprint tasks.
    tasks (id) {
        /// Internal task identifier.
        id -> Int8,
        /// Owning project.
        project_id -> Int8,
        /// Containing sprint.
        sprint_id -> Nullable<Int8>,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Longer description.
        description -> Nullable<Text>,
        /// Assigned user.
        assignee -> Nullable<Int8>,
        /// Task lifecycle status.
        #[max_length = 32]
        status -> Varchar,
        /// Story-point estimate.
        story_points -> Nullable<Int4>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Whether a reviewer approved the task.
        reviewed -> Bool,
        /// Reason given by the last rejecting reviewer.
        rejection_reason -> Nullable<Text>,
    }
}

diesel::table! {
    /// Developer stand-up reports.
    daily_reports (id) {
        /// Internal report identifier.
        id -> Int8,
        /// Reporting user.
        user_id -> Int8,
        /// Sprint active at submission time.
        sprint_id -> Int8,
        /// Day of the report.
        report_date -> Date,
        /// Finished work.
        completed -> Text,
        /// Planned work.
        planned -> Text,
        /// Blockers.
        blockers -> Text,
    }
}

diesel::table! {
    /// Product-owner sprint reviews.
    sprint_reviews (id) {
        /// Internal review identifier.
        id -> Int8,
        /// Reviewed sprint.
        sprint_id -> Int8,
        /// Author.
        author_id -> Int8,
        /// Day of the review.
        review_date -> Date,
        /// Review notes.
        notes -> Text,
        /// Share of sprint work completed.
        completion_percentage -> Float8,
    }
}

diesel::table! {
    /// Retrospectives recorded at sprint closure.
    retrospectives (id) {
        /// Internal retrospective identifier.
        id -> Int8,
        /// Closed sprint.
        sprint_id -> Int8,
        /// Closing user.
        held_by -> Int8,
        /// Day of the retrospective.
        held_on -> Date,
        /// Discussion summary.
        discussion -> Text,
    }
}

diesel::joinable!(tasks -> projects (project_id));
diesel::joinable!(tasks -> sprints (sprint_id));
diesel::joinable!(daily_reports -> sprints (sprint_id));
diesel::joinable!(retrospectives -> sprints (sprint_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    projects,
    sprints,
    tasks,
    daily_reports,
    sprint_reviews,
    retrospectives,
);
