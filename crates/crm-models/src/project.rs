//! Project model
//!
//! Delivery projects shown on the kanban board.

use chrono::NaiveDate;
use crm_core::traits::{Entity, Id, Identifiable};
use crm_core::types::Amount;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::task::{self, Task, TaskPriority};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    Review,
    Completed,
}

impl ProjectStatus {
    /// Kanban column order
    pub const BOARD: [ProjectStatus; 4] = [
        ProjectStatus::Planning,
        ProjectStatus::InProgress,
        ProjectStatus::Review,
        ProjectStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Completed => "Completed",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Completed)
    }
}

/// Project entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    pub client: String,

    pub status: ProjectStatus,

    pub due_date: NaiveDate,

    /// Completion percentage
    #[validate(range(max = 100))]
    pub progress: u8,

    pub budget: Amount,

    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Identifiable for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Project {
    const TYPE_NAME: &'static str = "Project";
}

impl Project {
    pub fn new(
        id: impl Into<Id>,
        title: impl Into<String>,
        client: impl Into<String>,
        due_date: NaiveDate,
        budget: Amount,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            client: client.into(),
            status: ProjectStatus::Planning,
            due_date,
            progress: 0,
            budget,
            tasks: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress.min(100);
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Active and past its due date
    pub fn is_late(&self, today: NaiveDate) -> bool {
        self.is_active() && self.due_date < today
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn toggle_task(&mut self, task_id: &str) -> bool {
        task::toggle_in(&mut self.tasks, task_id)
    }

    pub fn set_task_priority(&mut self, task_id: &str, priority: TaskPriority) -> bool {
        task::set_priority_in(&mut self.tasks, task_id, priority)
    }

    pub fn delete_task(&mut self, task_id: &str) -> bool {
        task::remove_from(&mut self.tasks, task_id)
    }

    /// Share of tasks marked done, as a whole percentage
    pub fn task_completion(&self) -> u8 {
        if self.tasks.is_empty() {
            return 0;
        }
        let done = self.tasks.iter().filter(|t| t.is_done()).count();
        ((done * 100) / self.tasks.len()) as u8
    }

    pub fn apply(&mut self, patch: &ProjectPatch) {
        if let Some(ref title) = patch.title {
            self.title = title.clone();
        }
        if let Some(ref client) = patch.client {
            self.client = client.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress.min(100);
        }
        if let Some(budget) = patch.budget {
            self.budget = budget;
        }
    }
}

/// Partial update for a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub client: Option<String>,
    pub status: Option<ProjectStatus>,
    pub due_date: Option<NaiveDate>,
    pub progress: Option<u8>,
    pub budget: Option<Amount>,
}

impl ProjectPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    #[test]
    fn test_apply_patch_clamps_progress() {
        let mut project = Project::new("p-1", "Storefront revamp", "Lotus Foods", day(30), 400000);
        project.apply(&ProjectPatch::new().status(ProjectStatus::Review).progress(140));
        assert_eq!(project.status, ProjectStatus::Review);
        assert_eq!(project.progress, 100);
    }

    #[test]
    fn test_task_completion() {
        let mut project = Project::new("p-1", "CRM rollout", "Zen Clinics", day(20), 150000);
        assert_eq!(project.task_completion(), 0);
        project.add_task(Task::new("t-1", "Wireframes", "Asha", day(5)));
        project.add_task(Task::new("t-2", "API", "Dev", day(10)));
        project.toggle_task("t-1");
        assert_eq!(project.task_completion(), 50);
    }

    #[test]
    fn test_is_late() {
        let project = Project::new("p-1", "App", "Client", day(10), 1);
        assert!(project.is_late(day(11)));
        assert!(!project.with_status(ProjectStatus::Completed).is_late(day(11)));
    }
}
