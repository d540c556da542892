use crate::models::Project;

/// List view plus current selection for projects.
#[derive(Debug, Default)]
pub struct ProjectStore {
    pub projects: Vec<Project>,
    pub current: Option<Project>,
}

impl ProjectStore {
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
    }

    pub fn set_project(&mut self, project: Project) {
        self.current = Some(project);
    }

    pub fn clear_project(&mut self) {
        self.current = None;
    }

    /// Insert a project, replacing any existing entry with the same id.
    pub fn add_project(&mut self, project: Project) {
        match self
            .projects
            .iter_mut()
            .find(|existing| existing.id == project.id)
        {
            Some(existing) => *existing = project,
            None => self.projects.push(project),
        }
    }

    /// Replace the entry matching the project's id; no-op when absent. A
    /// matching current selection is replaced as well.
    pub fn update_project(&mut self, updated: Project) {
        if let Some(existing) = self
            .projects
            .iter_mut()
            .find(|project| project.id == updated.id)
        {
            *existing = updated.clone();
        }
        if self
            .current
            .as_ref()
            .is_some_and(|current| current.id == updated.id)
        {
            self.current = Some(updated);
        }
    }

    /// Remove by id; clears a matching current selection.
    pub fn remove_project(&mut self, project_id: &str) {
        self.projects.retain(|project| project.id != project_id);
        if self
            .current
            .as_ref()
            .is_some_and(|current| current.id == project_id)
        {
            self.current = None;
        }
    }
}
