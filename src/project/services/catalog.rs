//! Project catalog service.
//!
//! Holds the team's project list and the currently open project, and
//! translates catalog mutations into document collaborator calls. An owned
//! state object with broadcast change notification, not a singleton.

use crate::document::{
    domain::{CollectionName, Document, DocumentId, Filter, Ordering},
    ports::{DocumentStore, DocumentStoreError},
};
use crate::identity::domain::{TeamId, UserId};
use crate::project::domain::{
    Project, ProjectDomainError, ProjectDraft, ProjectId, ProjectPatch, ProjectRecord,
};
use mockable::Clock;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Capacity of the project event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Change notifications emitted by the project catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectEvent {
    /// The team project list was replaced.
    Listed {
        /// Number of projects now cached.
        count: usize,
    },
    /// A project was created.
    Created(ProjectId),
    /// A project was updated.
    Updated(ProjectId),
    /// A project and its tasks were removed.
    Removed(ProjectId),
}

/// Service-level errors for project catalog operations.
#[derive(Debug, Error)]
pub enum ProjectCatalogError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// The document collaborator rejected the operation.
    #[error(transparent)]
    Store(#[from] DocumentStoreError),
    /// The referenced project does not exist.
    #[error("project not found: {0}")]
    NotFound(ProjectId),
    /// A stored project document could not be decoded.
    #[error("project document {id} is malformed")]
    MalformedDocument {
        /// Document that failed to decode.
        id: DocumentId,
        /// Decode failure.
        #[source]
        source: Arc<serde_json::Error>,
    },
}

/// Result type for project catalog operations.
pub type ProjectCatalogResult<T> = Result<T, ProjectCatalogError>;

/// Project catalog orchestration service.
pub struct ProjectCatalog<S, C>
where
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    documents: Arc<S>,
    clock: Arc<C>,
    projects: RwLock<Vec<Project>>,
    current: RwLock<Option<Project>>,
    last_error: RwLock<Option<String>>,
    events: broadcast::Sender<ProjectEvent>,
}

impl<S, C> ProjectCatalog<S, C>
where
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    /// Creates an empty catalog.
    #[must_use]
    pub fn new(documents: Arc<S>, clock: Arc<C>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            documents,
            clock,
            projects: RwLock::new(Vec::new()),
            current: RwLock::new(None),
            last_error: RwLock::new(None),
            events,
        }
    }

    /// Loads every project owned by `team`, newest first, replacing the
    /// cached list wholesale.
    ///
    /// # Errors
    ///
    /// Propagates store and decode failures; on failure the previously
    /// cached list is left untouched.
    pub async fn list_for_team(&self, team: TeamId) -> ProjectCatalogResult<Vec<Project>> {
        self.clear_failure();
        let result = self.try_list_for_team(team).await;
        if let Err(err) = &result {
            self.record_failure(err);
        }
        result
    }

    /// Fetches a single project and makes it current.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::NotFound`] when the project does not
    /// exist; propagates store and decode failures.
    pub async fn fetch(&self, project_id: ProjectId) -> ProjectCatalogResult<Project> {
        self.clear_failure();
        let result = self.try_fetch(project_id).await;
        if let Err(err) = &result {
            self.record_failure(err);
        }
        result
    }

    /// Creates a project for `team` owned by `owner` and prepends it to the
    /// cached list.
    ///
    /// # Errors
    ///
    /// Propagates validation and store failures; the failure message is
    /// recorded for the embedding UI.
    pub async fn create(
        &self,
        draft: ProjectDraft,
        team: TeamId,
        owner: UserId,
    ) -> ProjectCatalogResult<Project> {
        self.clear_failure();
        let result = self.try_create(draft, team, owner).await;
        if let Err(err) = &result {
            self.record_failure(err);
        }
        result
    }

    /// Merges patch fields into the project document and every cached copy.
    ///
    /// # Errors
    ///
    /// Propagates store failures, including `NotFound` for a missing
    /// document.
    pub async fn update(
        &self,
        project_id: ProjectId,
        patch: ProjectPatch,
    ) -> ProjectCatalogResult<()> {
        self.clear_failure();
        let result = self.try_update(project_id, patch).await;
        if let Err(err) = &result {
            self.record_failure(err);
        }
        result
    }

    /// Deletes the project document together with every task document that
    /// references it, in one atomic batch.
    ///
    /// # Errors
    ///
    /// Propagates store failures; on failure nothing is removed.
    pub async fn remove(&self, project_id: ProjectId) -> ProjectCatalogResult<()> {
        self.clear_failure();
        let result = self.try_remove(project_id).await;
        if let Err(err) = &result {
            self.record_failure(err);
        }
        result
    }

    /// Replaces the current project selection.
    pub fn set_current(&self, project: Option<Project>) {
        if let Ok(mut guard) = self.current.write() {
            *guard = project;
        }
    }

    /// Returns the currently open project, if any.
    #[must_use]
    pub fn current(&self) -> Option<Project> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    /// Returns the cached project list.
    #[must_use]
    pub fn projects(&self) -> Vec<Project> {
        self.projects
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Returns the most recent recorded failure message.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().ok().and_then(|guard| guard.clone())
    }

    /// Subscribes to catalog change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ProjectEvent> {
        self.events.subscribe()
    }

    async fn try_list_for_team(&self, team: TeamId) -> ProjectCatalogResult<Vec<Project>> {
        let documents = self
            .documents
            .query(
                CollectionName::PROJECTS,
                &[Filter::eq("team_id", team.to_string())],
                &Ordering::descending("created_at"),
            )
            .await?;
        let projects = documents
            .into_iter()
            .map(decode_project)
            .collect::<ProjectCatalogResult<Vec<_>>>()?;

        debug!(team = %team, count = projects.len(), "listed team projects");
        if let Ok(mut guard) = self.projects.write() {
            guard.clone_from(&projects);
        }
        self.notify(ProjectEvent::Listed {
            count: projects.len(),
        });
        Ok(projects)
    }

    async fn try_fetch(&self, project_id: ProjectId) -> ProjectCatalogResult<Project> {
        let document = self
            .documents
            .get(CollectionName::PROJECTS, document_id(project_id))
            .await?
            .ok_or(ProjectCatalogError::NotFound(project_id))?;
        let project = decode_project(document)?;
        self.set_current(Some(project.clone()));
        Ok(project)
    }

    async fn try_create(
        &self,
        draft: ProjectDraft,
        team: TeamId,
        owner: UserId,
    ) -> ProjectCatalogResult<Project> {
        let record = ProjectRecord::create(draft, team, owner, &*self.clock)?;
        let payload = encode_record(&record)?;
        let assigned = self
            .documents
            .add(CollectionName::PROJECTS, payload)
            .await?;
        let project = Project::from_persisted(ProjectId::from_uuid(assigned.into_inner()), record);

        info!(project = %project.id(), "created project");
        if let Ok(mut guard) = self.projects.write() {
            guard.insert(0, project.clone());
        }
        self.notify(ProjectEvent::Created(project.id()));
        Ok(project)
    }

    async fn try_update(
        &self,
        project_id: ProjectId,
        patch: ProjectPatch,
    ) -> ProjectCatalogResult<()> {
        let mut payload = encode_patch(&patch)?;
        let now = self.clock.utc();
        if let Value::Object(fields) = &mut payload {
            fields.insert(
                "updated_at".to_owned(),
                Value::from(now.timestamp_millis()),
            );
        }
        self.documents
            .update(CollectionName::PROJECTS, document_id(project_id), payload)
            .await?;

        if let Ok(mut guard) = self.projects.write() {
            for project in guard.iter_mut() {
                if project.id() == project_id {
                    project.apply(patch.clone(), &*self.clock);
                }
            }
        }
        if let Ok(mut guard) = self.current.write() {
            if let Some(project) = guard.as_mut() {
                if project.id() == project_id {
                    project.apply(patch, &*self.clock);
                }
            }
        }
        self.notify(ProjectEvent::Updated(project_id));
        Ok(())
    }

    async fn try_remove(&self, project_id: ProjectId) -> ProjectCatalogResult<()> {
        let tasks = self
            .documents
            .query(
                CollectionName::TASKS,
                &[Filter::eq("project_id", project_id.to_string())],
                &Ordering::ascending("position"),
            )
            .await?;

        let mut refs = vec![(CollectionName::PROJECTS, document_id(project_id))];
        refs.extend(
            tasks
                .iter()
                .map(|task| (CollectionName::TASKS, task.id())),
        );
        self.documents.batch_delete(&refs).await?;

        info!(project = %project_id, tasks = tasks.len(), "removed project and its tasks");
        if let Ok(mut guard) = self.projects.write() {
            guard.retain(|project| project.id() != project_id);
        }
        if let Ok(mut guard) = self.current.write() {
            if guard.as_ref().is_some_and(|p| p.id() == project_id) {
                *guard = None;
            }
        }
        self.notify(ProjectEvent::Removed(project_id));
        Ok(())
    }

    fn clear_failure(&self) {
        if let Ok(mut guard) = self.last_error.write() {
            *guard = None;
        }
    }

    fn record_failure(&self, err: &ProjectCatalogError) {
        warn!(error = %err, "project catalog operation failed");
        if let Ok(mut guard) = self.last_error.write() {
            *guard = Some(err.to_string());
        }
    }

    fn notify(&self, event: ProjectEvent) {
        // Send only fails when no subscriber is listening.
        drop(self.events.send(event));
    }
}

const fn document_id(project: ProjectId) -> DocumentId {
    DocumentId::from_uuid(project.into_inner())
}

fn decode_project(document: Document) -> ProjectCatalogResult<Project> {
    let id = document.id();
    let record: ProjectRecord = serde_json::from_value(document.into_data()).map_err(|err| {
        ProjectCatalogError::MalformedDocument {
            id,
            source: Arc::new(err),
        }
    })?;
    Ok(Project::from_persisted(
        ProjectId::from_uuid(id.into_inner()),
        record,
    ))
}

fn encode_record(record: &ProjectRecord) -> ProjectCatalogResult<Value> {
    serde_json::to_value(record)
        .map_err(DocumentStoreError::unavailable)
        .map_err(Into::into)
}

fn encode_patch(patch: &ProjectPatch) -> ProjectCatalogResult<Value> {
    serde_json::to_value(patch)
        .map_err(DocumentStoreError::unavailable)
        .map_err(Into::into)
}
