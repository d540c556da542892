use crate::models::Task;

/// List view plus current selection for tasks. Insertion order follows the
/// last list fetch.
#[derive(Debug, Default)]
pub struct TaskStore {
    pub tasks: Vec<Task>,
    pub current: Option<Task>,
}

impl TaskStore {
    /// Wholesale replace of the list view, no merging.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn clear_tasks(&mut self) {
        self.tasks.clear();
    }

    /// Store the selection with its due date truncated to a calendar date.
    pub fn set_current(&mut self, mut task: Task) {
        task.normalize_due_date();
        self.current = Some(task);
    }

    /// Insert a task, replacing any existing entry with the same id.
    pub fn add_task(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    /// Replace the entry matching the task's id; no-op when absent. A
    /// matching current selection is refreshed as well.
    pub fn update_task(&mut self, updated: Task) {
        if let Some(existing) = self.tasks.iter_mut().find(|task| task.id == updated.id) {
            *existing = updated.clone();
        }
        if self
            .current
            .as_ref()
            .is_some_and(|current| current.id == updated.id)
        {
            self.set_current(updated);
        }
    }

    pub fn remove_task(&mut self, task_id: &str) {
        self.tasks.retain(|task| task.id != task_id);
    }

    pub fn tasks_by_project(&self, project_id: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.project == project_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, project: &str) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            status: Default::default(),
            priority: Default::default(),
            parent_task_id: None,
            assigned_to: Vec::new(),
            completed: false,
            project: project.to_string(),
            due_date: String::new(),
        }
    }

    #[test]
    fn test_update_task_replaces_matching_entry() {
        let mut store = TaskStore::default();
        store.set_tasks(vec![task("a", "p1"), task("b", "p1")]);

        let mut replacement = task("a", "p1");
        replacement.title = "renamed".to_string();
        store.update_task(replacement);

        assert_eq!(store.tasks.len(), 2);
        assert_eq!(store.tasks[0].title, "renamed");
        assert_eq!(store.tasks[1].title, "task b");
    }

    #[test]
    fn test_update_task_unknown_id_is_noop() {
        let mut store = TaskStore::default();
        store.set_tasks(vec![task("a", "p1")]);

        store.update_task(task("ghost", "p1"));
        assert_eq!(store.tasks.len(), 1);
        assert_eq!(store.tasks[0].id, "a");
    }

    #[test]
    fn test_update_task_refreshes_current() {
        let mut store = TaskStore::default();
        store.set_tasks(vec![task("a", "p1")]);
        store.set_current(task("a", "p1"));

        let mut replacement = task("a", "p1");
        replacement.completed = true;
        store.update_task(replacement);

        assert!(store.current.as_ref().unwrap().completed);
    }

    #[test]
    fn test_add_task_dedupes_by_id() {
        let mut store = TaskStore::default();
        store.add_task(task("a", "p1"));

        let mut again = task("a", "p1");
        again.title = "fresher".to_string();
        store.add_task(again);

        assert_eq!(store.tasks.len(), 1);
        assert_eq!(store.tasks[0].title, "fresher");
    }

    #[test]
    fn test_clear_tasks_keeps_current() {
        let mut store = TaskStore::default();
        store.set_tasks(vec![task("a", "p1")]);
        store.set_current(task("a", "p1"));

        store.clear_tasks();
        assert!(store.tasks.is_empty());
        assert!(store.current.is_some());
    }

    #[test]
    fn test_remove_task_is_idempotent() {
        let mut store = TaskStore::default();
        store.set_tasks(vec![task("a", "p1"), task("b", "p1")]);

        store.remove_task("a");
        store.remove_task("a");
        assert_eq!(store.tasks.len(), 1);
        assert_eq!(store.tasks[0].id, "b");
    }

    #[test]
    fn test_set_current_truncates_due_date() {
        let mut store = TaskStore::default();
        let mut selected = task("a", "p1");
        selected.due_date = "2024-05-01T10:30:00.000+00:00".to_string();

        store.set_current(selected);
        assert_eq!(store.current.as_ref().unwrap().due_date, "2024-05-01");
    }

    #[test]
    fn test_tasks_by_project() {
        let mut store = TaskStore::default();
        store.set_tasks(vec![task("a", "p1"), task("b", "p2"), task("c", "p1")]);

        let mine = store.tasks_by_project("p1");
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|t| t.project == "p1"));
    }
}
