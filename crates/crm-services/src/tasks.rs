//! Task params shared by lead and project task services

use chrono::NaiveDate;
use crm_core::error::ValidationErrors;
use crm_core::traits::generate_id;
use crm_models::{Task, TaskPriority};

#[derive(Debug, Clone)]
pub struct TaskParams {
    pub title: String,
    pub assignee: String,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
}

impl TaskParams {
    pub fn new(title: impl Into<String>, assignee: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            assignee: assignee.into(),
            due_date,
            priority: TaskPriority::default(),
        }
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.title.trim().is_empty() {
            errors.add("title", "can't be blank");
        }
        errors.into_result()
    }

    pub(crate) fn into_task(self, client: Option<String>) -> Task {
        let mut task = Task::new(generate_id("task"), self.title.trim(), self.assignee, self.due_date)
            .with_priority(self.priority);
        task.client = client;
        task
    }
}
