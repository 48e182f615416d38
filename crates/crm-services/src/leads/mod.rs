//! Lead services
//!
//! - create: new lead, auto-assigned to the calling sales rep
//! - update: partial update validated against the full merged record
//! - delete: hard delete, executives and admin only
//! - activity: interaction log plus optional follow-up scheduling
//! - tasks: follow-up tasks attached to a lead

mod activity;
mod create;
mod delete;
mod tasks;
mod update;

pub use activity::{ActivityParams, LogActivityService};
pub use create::CreateLeadService;
pub use delete::DeleteLeadService;
pub use tasks::LeadTaskService;
pub use update::UpdateLeadService;

use chrono::NaiveDate;
use crm_core::types::Amount;
use crm_models::{Id, Lead, LeadPriority, LeadStatus};

/// Lead service params
#[derive(Debug, Clone, Default)]
pub struct LeadParams {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: Option<String>,
    pub value: Amount,
    pub status: Option<LeadStatus>,
    pub priority: Option<LeadPriority>,
    pub assigned_to: Option<String>,
    pub assigned_user_id: Option<Id>,
    pub next_follow_up: Option<NaiveDate>,
    pub selected_modules: Vec<Id>,
    pub score: Option<u8>,
    pub source: Option<String>,
}

impl LeadParams {
    pub fn new(name: impl Into<String>, company: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_value(mut self, value: Amount) -> Self {
        self.value = value;
        self
    }

    pub fn with_status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: LeadPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn assigned_to(mut self, name: impl Into<String>) -> Self {
        self.assigned_to = Some(name.into());
        self
    }

    pub fn owned_by(mut self, user_id: impl Into<Id>) -> Self {
        self.assigned_user_id = Some(user_id.into());
        self
    }

    pub fn follow_up_on(mut self, date: NaiveDate) -> Self {
        self.next_follow_up = Some(date);
        self
    }

    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Id>,
    {
        self.selected_modules = modules.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_score(mut self, score: u8) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Build the record; unset fields keep the `Lead::new` defaults
    pub(crate) fn into_lead(self, id: Id, today: NaiveDate) -> Lead {
        let mut lead = Lead::new(id, self.name, self.company, self.email, today).with_value(self.value);
        lead.phone = self.phone;
        if let Some(status) = self.status {
            lead.status = status;
        }
        if let Some(priority) = self.priority {
            lead.priority = priority;
        }
        if let Some(assigned_to) = self.assigned_to {
            lead.assigned_to = assigned_to;
        }
        lead.assigned_user_id = self.assigned_user_id;
        lead.next_follow_up = self.next_follow_up;
        lead.selected_modules = self.selected_modules;
        if let Some(score) = self.score {
            lead.score = score;
        }
        if let Some(source) = self.source {
            lead.source = source;
        }
        lead
    }
}
