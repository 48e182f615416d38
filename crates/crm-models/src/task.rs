//! Task model
//!
//! Tasks are owned by a lead or a project and only change through
//! toggle-done, priority change and delete.

use chrono::NaiveDate;
use crm_core::traits::{Entity, Id, Identifiable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    Done,
}

impl TaskStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Todo => Self::Done,
            Self::Done => Self::Todo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Id,
    pub title: String,
    /// Assignee display name
    pub assignee: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

impl Identifiable for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Task {
    const TYPE_NAME: &'static str = "Task";
}

impl Task {
    pub fn new(
        id: impl Into<Id>,
        title: impl Into<String>,
        assignee: impl Into<String>,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            assignee: assignee.into(),
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            due_date,
            client: None,
        }
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    pub fn toggle(&mut self) {
        self.status = self.status.toggled();
    }

    /// Open and past its due date
    pub fn is_late(&self, today: NaiveDate) -> bool {
        !self.is_done() && self.due_date < today
    }
}

/// Operations shared by every task list (lead tasks, project tasks)
pub(crate) fn toggle_in(tasks: &mut [Task], task_id: &str) -> bool {
    match tasks.iter_mut().find(|t| t.id == task_id) {
        Some(task) => {
            task.toggle();
            true
        }
        None => false,
    }
}

pub(crate) fn set_priority_in(tasks: &mut [Task], task_id: &str, priority: TaskPriority) -> bool {
    match tasks.iter_mut().find(|t| t.id == task_id) {
        Some(task) => {
            task.priority = priority;
            true
        }
        None => false,
    }
}

pub(crate) fn remove_from(tasks: &mut Vec<Task>, task_id: &str) -> bool {
    let before = tasks.len();
    tasks.retain(|t| t.id != task_id);
    tasks.len() != before
}
