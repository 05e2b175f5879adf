//! Shared helpers for end-to-end dialog tests.

use eyre::{Result, eyre};
use mockable::DefaultClock;
use rstest::fixture;
use sprintdesk::access::Role;
use sprintdesk::dialog::{
    domain::{Inbound, Keyboard, Reply},
    services::DialogEngine,
};
use sprintdesk::tracker::{
    adapters::memory::InMemoryTrackerStore,
    domain::{ExternalUserId, Task, TaskId, User},
    ports::{Change, TaskFilter, TrackerStore, UnitOfWork},
    services::TrackerService,
};
use std::sync::Arc;

/// Engine type used by the end-to-end tests.
pub type TestEngine = DialogEngine<InMemoryTrackerStore, DefaultClock>;

/// A chat session against a fresh engine and store.
pub struct Chat {
    /// Backing store, for seeding and inspection.
    pub store: Arc<InMemoryTrackerStore>,
    /// Engine under test.
    pub engine: TestEngine,
}

/// Provides a fresh chat for each test.
///
/// # Panics
///
/// Panics if the reply templates fail to compile.
#[fixture]
pub fn chat() -> Chat {
    let store = Arc::new(InMemoryTrackerStore::new());
    let tracker = TrackerService::new(Arc::clone(&store), Arc::new(DefaultClock));
    let engine = DialogEngine::new(tracker).expect("templates compile");
    Chat { store, engine }
}

impl Chat {
    /// Sends text as the user with `external_id`.
    pub async fn send(&self, external_id: i64, text: &str) -> Vec<Reply> {
        self.engine
            .handle(Inbound::text(
                ExternalUserId::new(external_id),
                &format!("User {external_id}"),
                text,
            ))
            .await
    }

    /// Presses an inline button as the user with `external_id`.
    pub async fn press(&self, external_id: i64, data: &str) -> Vec<Reply> {
        self.engine
            .handle(Inbound::button(
                ExternalUserId::new(external_id),
                &format!("User {external_id}"),
                data,
            ))
            .await
    }

    /// Sends each text in order and returns the replies to the last one.
    pub async fn conversation(&self, external_id: i64, texts: &[&str]) -> Vec<Reply> {
        let mut replies = Vec::new();
        for text in texts {
            replies = self.send(external_id, text).await;
        }
        replies
    }

    /// Registers through `/start` and assigns `role` directly in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if registration or the role change fails.
    pub async fn join(&self, external_id: i64, role: Role) -> Result<User> {
        self.send(external_id, "/start").await;
        let mut user = self
            .store
            .user_by_external_id(ExternalUserId::new(external_id))
            .await?
            .ok_or_else(|| eyre!("user {external_id} was not registered"))?;
        if role != user.role {
            self.store
                .commit(UnitOfWork::single(Change::SetRole {
                    user: user.id,
                    expected: user.role,
                    role,
                }))
                .await?;
            user.role = role;
        }
        Ok(user)
    }

    /// A tracker service over the same store.
    #[must_use]
    pub fn tracker(&self) -> TrackerService<InMemoryTrackerStore, DefaultClock> {
        TrackerService::new(Arc::clone(&self.store), Arc::new(DefaultClock))
    }

    /// Reloads a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user no longer exists.
    pub async fn reload(&self, user: &User) -> Result<User> {
        self.store
            .user(user.id)
            .await?
            .ok_or_else(|| eyre!("user {} vanished", user.id))
    }

    /// Reloads a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task no longer exists.
    pub async fn task(&self, id: TaskId) -> Result<Task> {
        self.store
            .task(id)
            .await?
            .ok_or_else(|| eyre!("task {id} vanished"))
    }

    /// Lists every task of the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub async fn all_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.store.tasks(TaskFilter::new()).await?)
    }

    /// Creates a project owned by `owner` holding `backlog` lines, through
    /// the dialogs, and returns the created backlog tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the project was not created.
    pub async fn project_with_backlog(
        &self,
        owner: (i64, &User),
        name: &str,
        backlog: &str,
    ) -> Result<Vec<Task>> {
        let (external_id, user) = owner;
        self.conversation(external_id, &["➕ Add project", name])
            .await;
        self.conversation(external_id, &["🗂 Add backlog tasks", name, backlog])
            .await;
        let project = self
            .tracker()
            .projects_created_by(user.id)
            .await?
            .into_iter()
            .find(|project| project.name == name)
            .ok_or_else(|| eyre!("project {name} was not created"))?;
        Ok(self.tracker().backlog(project.id).await?)
    }

    /// Plans every given task into a sprint for the user with `external_id`
    /// through the sprint planning dialog.
    pub async fn plan(&self, external_id: i64, project: &str, tasks: &[Task]) -> Vec<Reply> {
        self.send(external_id, "🚀 Plan sprint").await;
        self.send(external_id, project).await;
        for task in tasks {
            self.send(external_id, &planning_label(task)).await;
        }
        self.send(external_id, "done").await
    }
}

/// The label sprint planning offers for `task`.
#[must_use]
pub fn planning_label(task: &Task) -> String {
    format!("{} ({})", task.label(), task.story_points().unwrap_or_default())
}

/// Text of the last reply.
#[must_use]
pub fn last_text(replies: &[Reply]) -> &str {
    replies.last().map_or("", |reply| reply.text.as_str())
}

/// Labels of the last reply's keyboard.
#[must_use]
pub fn last_labels(replies: &[Reply]) -> Vec<&str> {
    replies
        .last()
        .and_then(|reply| reply.keyboard.as_ref())
        .map(Keyboard::labels)
        .unwrap_or_default()
}

/// Inline button payloads of every reply.
#[must_use]
pub fn button_data(replies: &[Reply]) -> Vec<&str> {
    replies
        .iter()
        .filter_map(|reply| match &reply.keyboard {
            Some(Keyboard::Inline(rows)) => Some(rows),
            _ => None,
        })
        .flatten()
        .flatten()
        .map(|button| button.data.as_str())
        .collect()
}
