//! Shared world state for board drag BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use quadro::board::services::DragCoordinator;
use quadro::document::adapters::memory::InMemoryDocumentStore;
use quadro::project::domain::{Column, ProjectId};
use quadro::task::domain::TaskId;
use quadro::task::services::TaskStore;
use rstest::fixture;
use uuid::Uuid;

/// Task store type used by the BDD world.
pub type TestTaskStore = TaskStore<InMemoryDocumentStore, DefaultClock>;

/// Drag coordinator type used by the BDD world.
pub type TestCoordinator = DragCoordinator<InMemoryDocumentStore, DefaultClock>;

/// Scenario world for board drag behaviour tests.
pub struct BoardDragWorld {
    pub store: Arc<TestTaskStore>,
    pub coordinator: TestCoordinator,
    pub project: ProjectId,
    pub columns: Vec<Column>,
    pub task_ids: HashMap<String, TaskId>,
}

impl BoardDragWorld {
    /// Creates a world over a fresh in-memory collaborator.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(TaskStore::new(
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(DefaultClock),
        ));
        Self {
            coordinator: DragCoordinator::new(Arc::clone(&store)),
            store,
            project: ProjectId::from_uuid(Uuid::new_v4()),
            columns: Vec::new(),
            task_ids: HashMap::new(),
        }
    }

    /// Looks up a task registered under a scenario name.
    pub fn task_named(&self, name: &str) -> Result<TaskId, eyre::Report> {
        self.task_ids
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task named {name:?} in scenario world"))
    }
}

impl Default for BoardDragWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardDragWorld {
    BoardDragWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
