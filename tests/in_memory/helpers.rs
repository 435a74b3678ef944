//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use quadro::board::services::DragCoordinator;
use quadro::document::adapters::memory::InMemoryDocumentStore;
use quadro::identity::adapters::memory::InMemoryAuthenticator;
use quadro::identity::services::SessionService;
use quadro::project::domain::ColumnId;
use quadro::project::services::ProjectCatalog;
use quadro::task::services::TaskStore;
use rstest::fixture;

/// Task store type used by integration tests.
pub type TestTaskStore = TaskStore<InMemoryDocumentStore, DefaultClock>;

/// Project catalog type used by integration tests.
pub type TestCatalog = ProjectCatalog<InMemoryDocumentStore, DefaultClock>;

/// Session service type used by integration tests.
pub type TestSession = SessionService<InMemoryDocumentStore, InMemoryAuthenticator, DefaultClock>;

/// Drag coordinator type used by integration tests.
pub type TestCoordinator = DragCoordinator<InMemoryDocumentStore, DefaultClock>;

/// The full application stack wired over one shared in-memory collaborator.
pub struct Stack {
    /// Shared document store handle.
    pub documents: Arc<InMemoryDocumentStore>,
    /// Session service.
    pub session: TestSession,
    /// Project catalog.
    pub catalog: TestCatalog,
    /// Task store.
    pub tasks: Arc<TestTaskStore>,
    /// Drag coordinator over the task store.
    pub coordinator: TestCoordinator,
}

/// Builds a stack over a fresh collaborator.
#[fixture]
pub fn stack() -> Stack {
    let documents = Arc::new(InMemoryDocumentStore::new());
    let clock = Arc::new(DefaultClock);
    let tasks = Arc::new(TaskStore::new(Arc::clone(&documents), Arc::clone(&clock)));
    Stack {
        session: SessionService::new(
            Arc::clone(&documents),
            Arc::new(InMemoryAuthenticator::new()),
            Arc::clone(&clock),
        ),
        catalog: ProjectCatalog::new(Arc::clone(&documents), Arc::clone(&clock)),
        coordinator: DragCoordinator::new(Arc::clone(&tasks)),
        tasks,
        documents,
    }
}

/// Builds a column key, panicking on invalid test input.
pub fn column_id(key: &str) -> ColumnId {
    ColumnId::new(key).expect("valid column key")
}
