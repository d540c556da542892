use std::sync::Arc;

use tracing::error;

use crate::constants::GENERATED_ID;
use crate::error::CoreError;
use crate::models::{NewProject, Project, ProjectPatch, Task};
use crate::remote::{Document, DocumentStore, Query};
use crate::stats::{project_stats, stats_by_project};
use crate::store::{SharedProjectStore, SharedTaskStore};

/// Project data access. Also owns the task-statistics enrichment, which
/// needs the tasks collection and the task store.
pub struct ProjectDb<S> {
    client: Arc<S>,
    projects_collection: String,
    tasks_collection: String,
    store: SharedProjectStore,
    task_store: SharedTaskStore,
}

impl<S: DocumentStore> ProjectDb<S> {
    pub fn new(
        client: Arc<S>,
        projects_collection: impl Into<String>,
        tasks_collection: impl Into<String>,
        store: SharedProjectStore,
        task_store: SharedTaskStore,
    ) -> Self {
        Self {
            client,
            projects_collection: projects_collection.into(),
            tasks_collection: tasks_collection.into(),
            store,
            task_store,
        }
    }

    pub fn store(&self) -> &SharedProjectStore {
        &self.store
    }

    /// List all projects, each enriched with task statistics. One batched
    /// task fetch grouped in memory; if either list call fails the whole
    /// load fails and the stores stay untouched.
    pub async fn list(&self) -> Result<Vec<Project>, CoreError> {
        let documents = self
            .client
            .list(&self.projects_collection, &[])
            .await
            .map_err(|err| {
                error!("failed to fetch projects: {err}");
                CoreError::fetch(err)
            })?;

        let mut projects: Vec<Project> = documents
            .iter()
            .map(Project::from_document)
            .collect::<Result<_, _>>()?;

        let task_documents = self
            .client
            .list(&self.tasks_collection, &[])
            .await
            .map_err(|err| {
                error!("failed to fetch tasks for project stats: {err}");
                CoreError::fetch(err)
            })?;
        let tasks = normalize_tasks(&task_documents)?;

        let mut stats = stats_by_project(&tasks);
        for project in &mut projects {
            project.stats = stats.remove(&project.id).unwrap_or_default();
        }

        self.store
            .update(|store| store.set_projects(projects.clone()));
        Ok(projects)
    }

    /// Project detail: the project, its tasks, and derived stats. Stores
    /// the enriched project as the current selection and replaces the task
    /// store's list view, mirroring what the detail screen shows.
    pub async fn get(&self, project_id: &str) -> Result<Project, CoreError> {
        let document = self
            .client
            .get(&self.projects_collection, project_id)
            .await
            .map_err(|err| {
                error!("failed to fetch project {project_id}: {err}");
                CoreError::from_remote(err)
            })?;
        let mut project = Project::from_document(&document)?;

        let queries = [Query::equal("project", project_id)];
        let task_documents = self
            .client
            .list(&self.tasks_collection, &queries)
            .await
            .map_err(|err| {
                error!("failed to fetch tasks for project {project_id}: {err}");
                CoreError::fetch(err)
            })?;
        let tasks = normalize_tasks(&task_documents)?;

        project.stats = project_stats(&tasks);

        self.store.update(|store| store.set_project(project.clone()));
        self.task_store.update(|store| store.set_tasks(tasks));
        Ok(project)
    }

    /// Create remotely, then insert locally with zero stats (a fresh
    /// project has no tasks yet).
    pub async fn create(&self, new_project: NewProject) -> Result<Project, CoreError> {
        let document = self
            .client
            .create(&self.projects_collection, GENERATED_ID, new_project.fields())
            .await
            .map_err(|err| {
                error!("failed to add project: {err}");
                CoreError::fetch(err)
            })?;

        let project = Project::from_document(&document)?;
        self.store.update(|store| store.add_project(project.clone()));
        Ok(project)
    }

    pub async fn update(
        &self,
        project_id: &str,
        patch: ProjectPatch,
    ) -> Result<Project, CoreError> {
        let document = self
            .client
            .update(&self.projects_collection, project_id, patch.fields())
            .await
            .map_err(|err| {
                error!("failed to update project {project_id}: {err}");
                CoreError::fetch(err)
            })?;

        let project = Project::from_document(&document)?;
        self.store
            .update(|store| store.update_project(project.clone()));
        Ok(project)
    }

    pub async fn delete(&self, project_id: &str) -> Result<(), CoreError> {
        self.client
            .delete(&self.projects_collection, project_id)
            .await
            .map_err(|err| {
                error!("failed to delete project {project_id}: {err}");
                CoreError::fetch(err)
            })?;

        self.store.update(|store| store.remove_project(project_id));
        Ok(())
    }
}

fn normalize_tasks(documents: &[Document]) -> Result<Vec<Task>, CoreError> {
    documents.iter().map(Task::from_document).collect()
}
