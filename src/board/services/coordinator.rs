//! Drag gesture coordinator.
//!
//! Tracks the active task through a drag gesture and commits every hover
//! that classifies to a move straight into the task store. The gesture
//! lifecycle is idle, then dragging, then a series of hover transitions,
//! then ended; ending only clears the marker, because the last hover
//! already committed its move.

use crate::board::domain::{BoardEntityId, DragOutcome, classify_drag};
use crate::document::ports::DocumentStore;
use crate::project::domain::Column;
use crate::task::{
    domain::{Task, TaskId},
    services::{TaskStore, TaskStoreResult},
};
use mockable::Clock;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Drag gesture state machine over a task store.
pub struct DragCoordinator<S, C>
where
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    store: Arc<TaskStore<S, C>>,
    active: Mutex<Option<TaskId>>,
}

impl<S, C> DragCoordinator<S, C>
where
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    /// Creates an idle coordinator over `store`.
    #[must_use]
    pub const fn new(store: Arc<TaskStore<S, C>>) -> Self {
        Self {
            store,
            active: Mutex::new(None),
        }
    }

    /// Enters the dragging state for `task_id`.
    ///
    /// An id the store does not know leaves the coordinator idle, so stray
    /// gesture events cannot start a drag.
    pub fn begin(&self, task_id: TaskId) {
        let known = self
            .store
            .tasks()
            .iter()
            .any(|task| task.id() == task_id);
        if let Ok(mut guard) = self.active.lock() {
            *guard = known.then_some(task_id);
        }
    }

    /// Classifies a hover transition and immediately commits any resulting
    /// move through the task store.
    ///
    /// Hovers are live commits: each new valid target refiles the task at
    /// once rather than waiting for the drop.
    ///
    /// # Errors
    ///
    /// Returns the task store's error when the committed move fails; the
    /// drag stays active so a later hover can retry.
    pub async fn hover(
        &self,
        over: &BoardEntityId,
        columns: &[Column],
    ) -> TaskStoreResult<DragOutcome> {
        let Some(active) = self.active_id() else {
            return Ok(DragOutcome::NoOp);
        };
        let tasks = self.store.tasks();
        let outcome = classify_drag(active, over, &tasks, columns);
        if let DragOutcome::Move(intent) = &outcome {
            debug!(task = %intent.task(), status = %intent.status(), "committing hover move");
            self.store
                .move_task(intent.task(), intent.status().clone(), intent.position())
                .await?;
        }
        Ok(outcome)
    }

    /// Leaves the dragging state.
    ///
    /// Commits nothing further; the last hover transition already applied
    /// its move.
    pub fn finish(&self) {
        if let Ok(mut guard) = self.active.lock() {
            *guard = None;
        }
    }

    /// Returns the task currently being dragged, for overlay rendering.
    #[must_use]
    pub fn active_task(&self) -> Option<Task> {
        let active = self.active_id()?;
        self.store
            .tasks()
            .into_iter()
            .find(|task| task.id() == active)
    }

    fn active_id(&self) -> Option<TaskId> {
        self.active.lock().ok().and_then(|guard| *guard)
    }
}
