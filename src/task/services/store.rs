//! Task store service.
//!
//! The single authoritative in-memory task list for the active project and
//! the translation layer between that list and the document collaborator.
//! Every mutation writes through first, then mirrors into the list, so the
//! list only ever reflects operations the collaborator accepted. An owned
//! state object with broadcast change notification, not a singleton.
//!
//! All state transitions run on the embedding event loop's callbacks; calls
//! are not fenced, so a stale load resolving late can overwrite newer
//! state. Cross-process writers race with last-writer-wins semantics.

use crate::document::{
    domain::{CollectionName, Document, DocumentId, Filter, Ordering},
    ports::{DocumentStore, DocumentStoreError},
};
use crate::identity::domain::UserId;
use crate::project::domain::{ColumnId, ProjectId};
use crate::task::domain::{
    Position, Task, TaskDomainError, TaskDraft, TaskFilters, TaskId, TaskPatch, TaskRecord,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Capacity of the task event channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Change notifications emitted by the task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStoreEvent {
    /// The task list was replaced from a load.
    Loaded {
        /// Project whose tasks were loaded.
        project_id: ProjectId,
        /// Number of tasks now cached.
        count: usize,
    },
    /// A task was created and appended.
    Created(TaskId),
    /// A task was updated in place.
    Updated(TaskId),
    /// A task was removed.
    Removed(TaskId),
    /// A task changed column or position.
    Moved {
        /// Task that moved.
        task: TaskId,
        /// Column the task now sits in.
        status: ColumnId,
        /// Sort key within that column.
        position: Position,
    },
}

/// Service-level errors for task store operations.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The document collaborator rejected the operation.
    #[error(transparent)]
    Store(#[from] DocumentStoreError),
    /// A stored task document could not be decoded.
    #[error("task document {id} is malformed")]
    MalformedDocument {
        /// Document that failed to decode.
        id: DocumentId,
        /// Decode failure.
        #[source]
        source: Arc<serde_json::Error>,
    },
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Write-through payload for a move.
#[derive(Debug, Serialize)]
struct MoveFields {
    status: ColumnId,
    position: Position,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    updated_at: DateTime<Utc>,
}

/// Task store orchestration service.
pub struct TaskStore<S, C>
where
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    documents: Arc<S>,
    clock: Arc<C>,
    tasks: RwLock<Vec<Task>>,
    filters: RwLock<TaskFilters>,
    loading: AtomicBool,
    last_error: RwLock<Option<String>>,
    events: broadcast::Sender<TaskStoreEvent>,
}

impl<S, C> TaskStore<S, C>
where
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    /// Creates a store with an empty task list.
    #[must_use]
    pub fn new(documents: Arc<S>, clock: Arc<C>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            documents,
            clock,
            tasks: RwLock::new(Vec::new()),
            filters: RwLock::new(TaskFilters::new()),
            loading: AtomicBool::new(false),
            last_error: RwLock::new(None),
            events,
        }
    }

    /// Loads every task of `project_id`, ordered by ascending position, and
    /// replaces the in-memory list wholesale.
    ///
    /// # Errors
    ///
    /// Propagates store and decode failures; on failure the prior list is
    /// left untouched and the message is recorded in [`Self::last_error`].
    pub async fn load(&self, project_id: ProjectId) -> TaskStoreResult<Vec<Task>> {
        self.clear_failure();
        self.loading.store(true, AtomicOrdering::SeqCst);
        let result = self.try_load(project_id).await;
        self.loading.store(false, AtomicOrdering::SeqCst);
        if let Err(err) = &result {
            self.record_failure(err);
        }
        result
    }

    /// Creates a task in `project_id`'s backlog and appends it to the list.
    ///
    /// The task takes a clock-derived position, empty collateral, and
    /// zeroed effort counters; the returned value carries the identity the
    /// collaborator assigned.
    ///
    /// # Errors
    ///
    /// Propagates validation and store failures; the message is recorded.
    pub async fn create(
        &self,
        draft: TaskDraft,
        project_id: ProjectId,
        reporter: UserId,
    ) -> TaskStoreResult<Task> {
        self.clear_failure();
        self.loading.store(true, AtomicOrdering::SeqCst);
        let result = self.try_create(draft, project_id, reporter).await;
        self.loading.store(false, AtomicOrdering::SeqCst);
        if let Err(err) = &result {
            self.record_failure(err);
        }
        result
    }

    /// Merges patch fields into the task document and the in-memory copy.
    ///
    /// Last writer wins; there is no version check.
    ///
    /// # Errors
    ///
    /// Propagates store failures, including `NotFound` for a missing
    /// document; the message is recorded.
    pub async fn update(&self, task_id: TaskId, patch: TaskPatch) -> TaskStoreResult<()> {
        self.clear_failure();
        self.loading.store(true, AtomicOrdering::SeqCst);
        let result = self.try_update(task_id, patch).await;
        self.loading.store(false, AtomicOrdering::SeqCst);
        if let Err(err) = &result {
            self.record_failure(err);
        }
        result
    }

    /// Deletes the task document and drops the in-memory copy.
    ///
    /// Comments and attachments inside the document go with it; nothing
    /// else is cascaded.
    ///
    /// # Errors
    ///
    /// Propagates store failures; the message is recorded.
    pub async fn remove(&self, task_id: TaskId) -> TaskStoreResult<()> {
        self.clear_failure();
        self.loading.store(true, AtomicOrdering::SeqCst);
        let result = self.try_remove(task_id).await;
        self.loading.store(false, AtomicOrdering::SeqCst);
        if let Err(err) = &result {
            self.record_failure(err);
        }
        result
    }

    /// Refiles a task under `status` at `position`, writing through first
    /// and mirroring into the in-memory list.
    ///
    /// This is the operation the board's drag handling drives.
    ///
    /// # Errors
    ///
    /// Propagates store failures; the message is recorded.
    pub async fn move_task(
        &self,
        task_id: TaskId,
        status: ColumnId,
        position: Position,
    ) -> TaskStoreResult<()> {
        self.clear_failure();
        let result = self.try_move(task_id, status, position).await;
        if let Err(err) = &result {
            self.record_failure(err);
        }
        result
    }

    /// Returns a snapshot of the in-memory task list.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Returns the tasks matching the active display filters.
    #[must_use]
    pub fn filtered_tasks(&self) -> Vec<Task> {
        let filters = self
            .filters
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default();
        self.tasks
            .read()
            .map(|guard| {
                guard
                    .iter()
                    .filter(|task| filters.matches(task))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replaces the active display filters.
    pub fn set_filters(&self, filters: TaskFilters) {
        if let Ok(mut guard) = self.filters.write() {
            *guard = filters;
        }
    }

    /// Clears the active display filters.
    pub fn clear_filters(&self) {
        self.set_filters(TaskFilters::new());
    }

    /// Returns whether a store operation is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(AtomicOrdering::SeqCst)
    }

    /// Returns the most recent recorded failure message.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().ok().and_then(|guard| guard.clone())
    }

    /// Subscribes to task change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TaskStoreEvent> {
        self.events.subscribe()
    }

    async fn try_load(&self, project_id: ProjectId) -> TaskStoreResult<Vec<Task>> {
        let documents = self
            .documents
            .query(
                CollectionName::TASKS,
                &[Filter::eq("project_id", project_id.to_string())],
                &Ordering::ascending("position"),
            )
            .await?;

        // Decode everything before touching the list, so a bad document
        // cannot leave a partial overwrite behind.
        let tasks = documents
            .into_iter()
            .map(decode_task)
            .collect::<TaskStoreResult<Vec<_>>>()?;

        info!(project = %project_id, count = tasks.len(), "loaded project tasks");
        if let Ok(mut guard) = self.tasks.write() {
            guard.clone_from(&tasks);
        }
        self.notify(TaskStoreEvent::Loaded {
            project_id,
            count: tasks.len(),
        });
        Ok(tasks)
    }

    async fn try_create(
        &self,
        draft: TaskDraft,
        project_id: ProjectId,
        reporter: UserId,
    ) -> TaskStoreResult<Task> {
        let record = TaskRecord::create(draft, project_id, reporter, &*self.clock)?;
        let payload = encode(&record)?;
        let assigned = self.documents.add(CollectionName::TASKS, payload).await?;
        let task = Task::from_persisted(TaskId::from_uuid(assigned.into_inner()), record);

        info!(task = %task.id(), project = %project_id, "created task");
        if let Ok(mut guard) = self.tasks.write() {
            guard.push(task.clone());
        }
        self.notify(TaskStoreEvent::Created(task.id()));
        Ok(task)
    }

    async fn try_update(&self, task_id: TaskId, patch: TaskPatch) -> TaskStoreResult<()> {
        let mut payload = encode(&patch)?;
        if let Value::Object(fields) = &mut payload {
            fields.insert(
                "updated_at".to_owned(),
                Value::from(self.clock.utc().timestamp_millis()),
            );
        }
        self.documents
            .update(CollectionName::TASKS, document_id(task_id), payload)
            .await?;

        if let Ok(mut guard) = self.tasks.write() {
            for task in guard.iter_mut() {
                if task.id() == task_id {
                    task.apply(patch.clone(), &*self.clock);
                }
            }
        }
        self.notify(TaskStoreEvent::Updated(task_id));
        Ok(())
    }

    async fn try_remove(&self, task_id: TaskId) -> TaskStoreResult<()> {
        self.documents
            .delete(CollectionName::TASKS, document_id(task_id))
            .await?;

        if let Ok(mut guard) = self.tasks.write() {
            guard.retain(|task| task.id() != task_id);
        }
        self.notify(TaskStoreEvent::Removed(task_id));
        Ok(())
    }

    async fn try_move(
        &self,
        task_id: TaskId,
        status: ColumnId,
        position: Position,
    ) -> TaskStoreResult<()> {
        let fields = MoveFields {
            status: status.clone(),
            position,
            updated_at: self.clock.utc(),
        };
        self.documents
            .update(CollectionName::TASKS, document_id(task_id), encode(&fields)?)
            .await?;

        debug!(task = %task_id, status = %status, position = %position, "moved task");
        if let Ok(mut guard) = self.tasks.write() {
            for task in guard.iter_mut() {
                if task.id() == task_id {
                    task.relocate(status.clone(), position, &*self.clock);
                }
            }
        }
        self.notify(TaskStoreEvent::Moved {
            task: task_id,
            status,
            position,
        });
        Ok(())
    }

    fn clear_failure(&self) {
        if let Ok(mut guard) = self.last_error.write() {
            *guard = None;
        }
    }

    fn record_failure(&self, err: &TaskStoreError) {
        warn!(error = %err, "task store operation failed");
        if let Ok(mut guard) = self.last_error.write() {
            *guard = Some(err.to_string());
        }
    }

    fn notify(&self, event: TaskStoreEvent) {
        // Send only fails when no subscriber is listening.
        drop(self.events.send(event));
    }
}

const fn document_id(task: TaskId) -> DocumentId {
    DocumentId::from_uuid(task.into_inner())
}

fn decode_task(document: Document) -> TaskStoreResult<Task> {
    let id = document.id();
    let record: TaskRecord = serde_json::from_value(document.into_data()).map_err(|err| {
        TaskStoreError::MalformedDocument {
            id,
            source: Arc::new(err),
        }
    })?;
    Ok(Task::from_persisted(
        TaskId::from_uuid(id.into_inner()),
        record,
    ))
}

fn encode<T: Serialize>(value: &T) -> TaskStoreResult<Value> {
    serde_json::to_value(value)
        .map_err(DocumentStoreError::unavailable)
        .map_err(Into::into)
}
