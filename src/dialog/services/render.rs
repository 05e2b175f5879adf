//! Template rendering of list views and report cards.

use super::error::{DialogError, DialogResult};
use crate::tracker::domain::{DailyReport, Project, SprintReview, Task, User};
use minijinja::{Environment, context};
use serde::Serialize;

pub(crate) const MY_TASKS: &str = "my_tasks";
pub(crate) const PROJECTS: &str = "projects";
pub(crate) const DAILY_REPORT: &str = "daily_report";
pub(crate) const SPRINT_REVIEW: &str = "sprint_review";
pub(crate) const REVIEW_CARD: &str = "review_card";
pub(crate) const USER_CARD: &str = "user_card";

const TEMPLATES: [(&str, &str); 6] = [
    (
        MY_TASKS,
        "📋 Your tasks:\n{% for task in tasks %}\n🔹 [{{ task.id }}] {{ task.title }} | {{ task.status }}{% endfor %}",
    ),
    (
        PROJECTS,
        "📋 Your projects:\n{% for project in projects %}\n🔹 {{ project.name }} | created {{ project.created_at }}{% endfor %}",
    ),
    (
        DAILY_REPORT,
        "📅 {{ report.date }}\n👤 Developer ID: {{ report.user_id }}\n✅ Completed: {{ report.completed }}\n📌 Planned: {{ report.planned }}\n🚫 Blockers: {{ report.blockers }}",
    ),
    (
        SPRINT_REVIEW,
        "🗓️ Date: {{ review.date }}\n🧩 Sprint ID: {{ review.sprint_id }}\n📄 Notes: {{ review.notes }}\n📊 Completed: {{ review.completion }}%",
    ),
    (
        REVIEW_CARD,
        "📝 [{{ task.id }}] {{ task.title }}\n🎯 Story points: {{ task.points }}\n📄 {{ task.description or '—' }}\n\nTask '{{ task.title }}'?",
    ),
    (USER_CARD, "👤 {{ user.name }} | role: {{ user.role }}"),
];

#[derive(Serialize)]
struct TaskView<'a> {
    id: i64,
    title: &'a str,
    status: &'static str,
    points: u32,
    description: Option<&'a str>,
}

impl<'a> From<&'a Task> for TaskView<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            id: task.id().value(),
            title: task.title(),
            status: task.status().as_str(),
            points: task.story_points().unwrap_or_default(),
            description: task.description(),
        }
    }
}

#[derive(Serialize)]
struct ProjectView<'a> {
    name: &'a str,
    created_at: String,
}

#[derive(Serialize)]
struct DailyReportView<'a> {
    date: String,
    user_id: i64,
    completed: &'a str,
    planned: &'a str,
    blockers: &'a str,
}

#[derive(Serialize)]
struct SprintReviewView<'a> {
    date: String,
    sprint_id: i64,
    notes: &'a str,
    completion: String,
}

#[derive(Serialize)]
struct UserView<'a> {
    name: &'a str,
    role: &'static str,
}

/// Owns the compiled reply templates.
#[derive(Debug)]
pub(crate) struct Renderer {
    environment: Environment<'static>,
}

impl Renderer {
    pub(crate) fn new() -> DialogResult<Self> {
        let mut environment = Environment::new();
        for (name, source) in TEMPLATES {
            environment
                .add_template(name, source)
                .map_err(|error| render_error(name, &error))?;
        }
        Ok(Self { environment })
    }

    pub(crate) fn my_tasks(&self, tasks: &[Task]) -> DialogResult<String> {
        let views: Vec<TaskView<'_>> = tasks.iter().map(TaskView::from).collect();
        self.render(MY_TASKS, context! { tasks => views })
    }

    pub(crate) fn projects(&self, projects: &[Project]) -> DialogResult<String> {
        let views: Vec<ProjectView<'_>> = projects
            .iter()
            .map(|project| ProjectView {
                name: &project.name,
                created_at: project.created_at.format("%Y-%m-%d %H:%M").to_string(),
            })
            .collect();
        self.render(PROJECTS, context! { projects => views })
    }

    pub(crate) fn daily_report(&self, report: &DailyReport) -> DialogResult<String> {
        let view = DailyReportView {
            date: report.report_date.to_string(),
            user_id: report.user_id.value(),
            completed: &report.completed,
            planned: &report.planned,
            blockers: &report.blockers,
        };
        self.render(DAILY_REPORT, context! { report => view })
    }

    pub(crate) fn sprint_review(&self, review: &SprintReview) -> DialogResult<String> {
        let view = SprintReviewView {
            date: review.review_date.to_string(),
            sprint_id: review.sprint_id.value(),
            notes: &review.notes,
            completion: format!("{:.1}", review.completion_percentage),
        };
        self.render(SPRINT_REVIEW, context! { review => view })
    }

    pub(crate) fn review_card(&self, task: &Task) -> DialogResult<String> {
        self.render(REVIEW_CARD, context! { task => TaskView::from(task) })
    }

    pub(crate) fn user_card(&self, user: &User) -> DialogResult<String> {
        let view = UserView {
            name: &user.name,
            role: user.role.as_str(),
        };
        self.render(USER_CARD, context! { user => view })
    }

    fn render<S: Serialize>(&self, name: &'static str, ctx: S) -> DialogResult<String> {
        self.environment
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(|error| render_error(name, &error))
    }
}

fn render_error(template: &'static str, error: &minijinja::Error) -> DialogError {
    DialogError::Render {
        template,
        reason: error.to_string(),
    }
}
