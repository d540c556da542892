use std::sync::Arc;

use tracing::error;

use crate::constants::GENERATED_ID;
use crate::error::CoreError;
use crate::models::{NewTask, Task, TaskPatch};
use crate::remote::{DocumentStore, Query};
use crate::store::SharedTaskStore;

/// Task data access.
pub struct TaskDb<S> {
    client: Arc<S>,
    collection_id: String,
    store: SharedTaskStore,
}

impl<S: DocumentStore> TaskDb<S> {
    pub fn new(client: Arc<S>, collection_id: impl Into<String>, store: SharedTaskStore) -> Self {
        Self {
            client,
            collection_id: collection_id.into(),
            store,
        }
    }

    pub fn store(&self) -> &SharedTaskStore {
        &self.store
    }

    /// Fetch every task and wholesale-replace the local list view.
    pub async fn list(&self) -> Result<Vec<Task>, CoreError> {
        let documents = self
            .client
            .list(&self.collection_id, &[])
            .await
            .map_err(|err| {
                error!("failed to fetch tasks: {err}");
                CoreError::fetch(err)
            })?;

        let tasks: Vec<Task> = documents
            .iter()
            .map(Task::from_document)
            .collect::<Result<_, _>>()?;

        self.store.update(|store| store.set_tasks(tasks.clone()));
        Ok(tasks)
    }

    /// Fetch one project's tasks via the backend's equality filter. Leaves
    /// the store alone; project detail loading decides what to mirror.
    pub async fn list_for_project(&self, project_id: &str) -> Result<Vec<Task>, CoreError> {
        let queries = [Query::equal("project", project_id)];
        let documents = self
            .client
            .list(&self.collection_id, &queries)
            .await
            .map_err(|err| {
                error!("failed to fetch tasks for project {project_id}: {err}");
                CoreError::fetch(err)
            })?;

        documents.iter().map(Task::from_document).collect()
    }

    pub async fn get(&self, task_id: &str) -> Result<Task, CoreError> {
        let document = self
            .client
            .get(&self.collection_id, task_id)
            .await
            .map_err(|err| {
                error!("failed to fetch task {task_id}: {err}");
                CoreError::from_remote(err)
            })?;

        Task::from_document(&document)
    }

    /// Create remotely (backend-assigned id), then insert the confirmed
    /// entity into the list view.
    pub async fn create(&self, new_task: NewTask) -> Result<Task, CoreError> {
        let document = self
            .client
            .create(&self.collection_id, GENERATED_ID, new_task.fields())
            .await
            .map_err(|err| {
                error!("failed to add task: {err}");
                CoreError::fetch(err)
            })?;

        let task = Task::from_document(&document)?;
        self.store.update(|store| store.add_task(task.clone()));
        Ok(task)
    }

    pub async fn update(&self, task_id: &str, patch: TaskPatch) -> Result<Task, CoreError> {
        let document = self
            .client
            .update(&self.collection_id, task_id, patch.fields())
            .await
            .map_err(|err| {
                error!("failed to update task {task_id}: {err}");
                CoreError::fetch(err)
            })?;

        let task = Task::from_document(&document)?;
        self.store.update(|store| store.update_task(task.clone()));
        Ok(task)
    }

    pub async fn delete(&self, task_id: &str) -> Result<(), CoreError> {
        self.client
            .delete(&self.collection_id, task_id)
            .await
            .map_err(|err| {
                error!("failed to delete task {task_id}: {err}");
                CoreError::fetch(err)
            })?;

        self.store.update(|store| store.remove_task(task_id));
        Ok(())
    }

    pub async fn toggle_completion(&self, task: &Task) -> Result<Task, CoreError> {
        let patch = TaskPatch {
            completed: Some(!task.completed),
            ..TaskPatch::default()
        };
        self.update(&task.id, patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MemoryDocumentStore;
    use crate::store::Shared;

    fn task_db() -> (Arc<MemoryDocumentStore>, TaskDb<MemoryDocumentStore>) {
        let client = Arc::new(MemoryDocumentStore::new());
        let db = TaskDb::new(Arc::clone(&client), "tasks", Shared::default());
        (client, db)
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (_, db) = task_db();

        let created = db.create(NewTask::new("Frame walls", "p1")).await.unwrap();
        assert!(!created.id.is_empty());

        let tasks = db.list().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Frame walls");
        assert_eq!(db.store().read(|store| store.tasks.len()), 1);
    }

    #[tokio::test]
    async fn test_create_failure_leaves_store_unchanged() {
        let (client, db) = task_db();
        db.create(NewTask::new("Existing", "p1")).await.unwrap();

        client.fail_next_call();
        let result = db.create(NewTask::new("Doomed", "p1")).await;

        assert!(matches!(
            result,
            Err(CoreError::FetchFailed { status: 500, .. })
        ));
        assert_eq!(db.store().read(|store| store.tasks.len()), 1);
        assert_eq!(client.count("tasks"), 1);
    }

    #[tokio::test]
    async fn test_list_failure_keeps_previous_view() {
        let (client, db) = task_db();
        db.create(NewTask::new("Kept", "p1")).await.unwrap();
        db.list().await.unwrap();

        client.fail_next_call();
        assert!(db.list().await.is_err());
        assert_eq!(db.store().read(|store| store.tasks.len()), 1);
    }

    #[tokio::test]
    async fn test_update_mirrors_into_store() {
        let (_, db) = task_db();
        let created = db.create(NewTask::new("Paint", "p1")).await.unwrap();

        let patch = TaskPatch {
            title: Some("Paint twice".to_string()),
            ..TaskPatch::default()
        };
        let updated = db.update(&created.id, patch).await.unwrap();
        assert_eq!(updated.title, "Paint twice");

        let stored = db.store().read(|store| store.tasks[0].clone());
        assert_eq!(stored.title, "Paint twice");
    }

    #[tokio::test]
    async fn test_update_payload_cannot_carry_project() {
        let (client, db) = task_db();
        let created = db.create(NewTask::new("Move", "p1")).await.unwrap();

        // The patch type has no project field at all; verify the stored
        // document's project survives any update untouched.
        let patch = TaskPatch {
            completed: Some(true),
            ..TaskPatch::default()
        };
        db.update(&created.id, patch).await.unwrap();

        let document = client.get("tasks", &created.id).await.unwrap();
        assert_eq!(document.fields["project"], "p1");
        assert_eq!(document.fields["completed"], true);
    }

    #[tokio::test]
    async fn test_delete_removes_from_store() {
        let (_, db) = task_db();
        let created = db.create(NewTask::new("Trash", "p1")).await.unwrap();
        db.list().await.unwrap();

        db.delete(&created.id).await.unwrap();
        assert_eq!(db.store().read(|store| store.tasks.len()), 0);
    }

    #[tokio::test]
    async fn test_toggle_completion_flips_flag() {
        let (_, db) = task_db();
        let created = db.create(NewTask::new("Flip", "p1")).await.unwrap();
        assert!(!created.completed);

        let toggled = db.toggle_completion(&created).await.unwrap();
        assert!(toggled.completed);

        let toggled_back = db.toggle_completion(&toggled).await.unwrap();
        assert!(!toggled_back.completed);
    }

    #[tokio::test]
    async fn test_list_for_project_filters_remotely() {
        let (_, db) = task_db();
        db.create(NewTask::new("Mine", "p1")).await.unwrap();
        db.create(NewTask::new("Other", "p2")).await.unwrap();

        let tasks = db.list_for_project("p1").await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Mine");
    }

    #[tokio::test]
    async fn test_get_missing_task_is_not_found() {
        let (_, db) = task_db();
        let result = db.get("ghost").await;
        assert!(matches!(result, Err(CoreError::NotFound)));
    }
}
