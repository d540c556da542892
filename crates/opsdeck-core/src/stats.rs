//! Derived task statistics. Computed from the task list on read; never
//! persisted to the remote store.

use std::collections::HashMap;

use crate::models::{ProjectStats, Task};

/// Completion statistics for one project's tasks. Order-independent, O(n).
pub fn project_stats(tasks: &[Task]) -> ProjectStats {
    let total = tasks.len() as u32;
    let completed = tasks.iter().filter(|task| task.completed).count() as u32;
    ProjectStats::from_counts(total, completed)
}

/// Group tasks by owning project and compute stats per group in one pass.
/// Backs the project-list load: one batched task fetch instead of a
/// task-list call per project.
pub fn stats_by_project(tasks: &[Task]) -> HashMap<String, ProjectStats> {
    let mut counts: HashMap<String, (u32, u32)> = HashMap::new();
    for task in tasks {
        let entry = counts.entry(task.project.clone()).or_insert((0, 0));
        entry.0 += 1;
        if task.completed {
            entry.1 += 1;
        }
    }

    counts
        .into_iter()
        .map(|(project, (total, completed))| (project, ProjectStats::from_counts(total, completed)))
        .collect()
}
