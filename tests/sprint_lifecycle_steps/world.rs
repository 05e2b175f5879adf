//! Shared world state for sprint lifecycle BDD scenarios.

use std::sync::Arc;

use eyre::{Result, eyre};
use mockable::DefaultClock;
use rstest::fixture;
use sprintdesk::dialog::{
    domain::{Inbound, Reply},
    services::DialogEngine,
};
use sprintdesk::tracker::{
    adapters::memory::InMemoryTrackerStore,
    domain::{ExternalUserId, Task, User},
    ports::{TaskFilter, TrackerStore},
    services::TrackerService,
};

/// Chat identity of the product owner.
pub const PRODUCT_OWNER: i64 = 1;
/// Chat identity of the developer doing the sprint work.
pub const DEVELOPER: i64 = 2;
/// Chat identity of the reviewing developer.
pub const REVIEWER: i64 = 3;

/// Scenario world for sprint lifecycle behaviour tests.
pub struct SprintWorld {
    pub store: Arc<InMemoryTrackerStore>,
    pub engine: DialogEngine<InMemoryTrackerStore, DefaultClock>,
    pub developer: Option<User>,
    pub last_replies: Vec<Reply>,
}

impl SprintWorld {
    /// Creates a world over an empty store.
    ///
    /// # Panics
    ///
    /// Panics if the reply templates fail to compile.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTrackerStore::new());
        let tracker = TrackerService::new(Arc::clone(&store), Arc::new(DefaultClock));
        let engine = DialogEngine::new(tracker).expect("templates compile");
        Self {
            store,
            engine,
            developer: None,
            last_replies: Vec::new(),
        }
    }

    /// Sends each text in order as `external_id`, keeping the last replies.
    pub fn say(&mut self, external_id: i64, texts: &[&str]) {
        for text in texts {
            let event = Inbound::text(
                ExternalUserId::new(external_id),
                &format!("User {external_id}"),
                *text,
            );
            self.last_replies = run_async(self.engine.handle(event));
        }
    }

    /// Finds a task by title.
    pub fn task_titled(&self, title: &str) -> Result<Task> {
        run_async(self.store.tasks(TaskFilter::new()))?
            .into_iter()
            .find(|task| task.title() == title)
            .ok_or_else(|| eyre!("no task titled {title}"))
    }

    /// Text of the last reply.
    #[must_use]
    pub fn last_text(&self) -> &str {
        self.last_replies
            .last()
            .map_or("", |reply| reply.text.as_str())
    }
}

impl Default for SprintWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SprintWorld {
    SprintWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
