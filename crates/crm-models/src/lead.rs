//! Lead model
//!
//! A lead is a prospective client moving through the sales pipeline. Its
//! activity history is append-only; tasks hang off it for follow-up work.

use chrono::NaiveDate;
use crm_core::traits::{Entity, Id, Identifiable};
use crm_core::types::Amount;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::task::{self, Task, TaskPriority};

/// Pipeline stage. Transitions are unconstrained: any status may follow any
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    MeetingScheduled,
    ProposalSent,
    ClosedWon,
    ClosedLost,
}

impl LeadStatus {
    /// Pipeline order, as shown on the kanban board
    pub const PIPELINE: [LeadStatus; 6] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::MeetingScheduled,
        LeadStatus::ProposalSent,
        LeadStatus::ClosedWon,
        LeadStatus::ClosedLost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Contacted => "CONTACTED",
            Self::MeetingScheduled => "MEETING_SCHEDULED",
            Self::ProposalSent => "PROPOSAL_SENT",
            Self::ClosedWon => "CLOSED_WON",
            Self::ClosedLost => "CLOSED_LOST",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::MeetingScheduled => "Meeting Scheduled",
            Self::ProposalSent => "Proposal Sent",
            Self::ClosedWon => "Closed Won",
            Self::ClosedLost => "Closed Lost",
        }
    }

    /// CLOSED_WON or CLOSED_LOST
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::ClosedWon | Self::ClosedLost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadPriority {
    Hot,
    #[default]
    Warm,
    Cold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    #[default]
    NotGenerated,
    Draft,
    Sent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    ColdCall,
    ColdMessage,
    Email,
    Visit,
    Quotation,
    Requirements,
    Meeting,
    Note,
}

/// One logged interaction. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub date: NaiveDate,
    pub note: String,
}

impl Activity {
    pub fn new(activity_type: ActivityType, date: NaiveDate, note: impl Into<String>) -> Self {
        Self {
            activity_type,
            date,
            note: note.into(),
        }
    }
}

/// Lead entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Id,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub company: String,

    #[validate(email)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Deal value in whole currency units
    pub value: Amount,

    pub status: LeadStatus,

    pub priority: LeadPriority,

    /// Free-text owner name as typed by staff
    pub assigned_to: String,

    /// Explicit owner; takes precedence over `assigned_to` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user_id: Option<Id>,

    pub last_contact: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<NaiveDate>,

    #[serde(default)]
    pub activities: Vec<Activity>,

    #[serde(default)]
    pub tasks: Vec<Task>,

    /// Quotation module ids picked for this client
    #[serde(default)]
    pub selected_modules: Vec<Id>,

    #[serde(default)]
    pub quote_status: QuoteStatus,

    #[validate(range(max = 100))]
    pub score: u8,

    pub source: String,
}

impl Identifiable for Lead {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Lead {
    const TYPE_NAME: &'static str = "Lead";
}

impl Lead {
    pub fn new(
        id: impl Into<Id>,
        name: impl Into<String>,
        company: impl Into<String>,
        email: impl Into<String>,
        last_contact: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            company: company.into(),
            email: email.into(),
            phone: None,
            value: 0,
            status: LeadStatus::New,
            priority: LeadPriority::Warm,
            assigned_to: String::new(),
            assigned_user_id: None,
            last_contact,
            next_follow_up: None,
            activities: Vec::new(),
            tasks: Vec::new(),
            selected_modules: Vec::new(),
            quote_status: QuoteStatus::NotGenerated,
            score: 50,
            source: "Manual".to_string(),
        }
    }

    pub fn with_value(mut self, value: Amount) -> Self {
        self.value = value;
        self
    }

    pub fn with_status(mut self, status: LeadStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: LeadPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn assigned_to(mut self, name: impl Into<String>) -> Self {
        self.assigned_to = name.into();
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

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_score(mut self, score: u8) -> Self {
        self.score = score;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    /// Append an interaction. The last-contact date moves forward to the
    /// activity date, never backwards.
    pub fn log_activity(&mut self, activity: Activity) {
        if activity.date > self.last_contact {
            self.last_contact = activity.date;
        }
        self.activities.push(activity);
    }

    /// Activities newest first (display order)
    pub fn recent_activities(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter().rev()
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

    /// Merge the set fields of `patch` into this lead
    pub fn apply(&mut self, patch: &LeadPatch) {
        if let Some(ref name) = patch.name {
            self.name = name.clone();
        }
        if let Some(ref company) = patch.company {
            self.company = company.clone();
        }
        if let Some(ref email) = patch.email {
            self.email = email.clone();
        }
        if let Some(ref phone) = patch.phone {
            self.phone = phone.clone();
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(ref assigned_to) = patch.assigned_to {
            self.assigned_to = assigned_to.clone();
        }
        if let Some(ref owner) = patch.assigned_user_id {
            self.assigned_user_id = owner.clone();
        }
        if let Some(last_contact) = patch.last_contact {
            self.last_contact = last_contact;
        }
        if let Some(next) = patch.next_follow_up {
            self.next_follow_up = next;
        }
        if let Some(ref modules) = patch.selected_modules {
            self.selected_modules = modules.clone();
        }
        if let Some(quote_status) = patch.quote_status {
            self.quote_status = quote_status;
        }
        if let Some(score) = patch.score {
            self.score = score;
        }
        if let Some(ref source) = patch.source {
            self.source = source.clone();
        }
    }
}

/// Partial update for a lead. `None` leaves a field untouched; nested
/// options (`Some(None)`) clear optional fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPatch {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub value: Option<Amount>,
    pub status: Option<LeadStatus>,
    pub priority: Option<LeadPriority>,
    pub assigned_to: Option<String>,
    pub assigned_user_id: Option<Option<Id>>,
    pub last_contact: Option<NaiveDate>,
    pub next_follow_up: Option<Option<NaiveDate>>,
    pub selected_modules: Option<Vec<Id>>,
    pub quote_status: Option<QuoteStatus>,
    pub score: Option<u8>,
    pub source: Option<String>,
}

impl LeadPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: LeadPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn value(mut self, value: Amount) -> Self {
        self.value = Some(value);
        self
    }

    pub fn next_follow_up(mut self, date: Option<NaiveDate>) -> Self {
        self.next_follow_up = Some(date);
        self
    }

    pub fn selected_modules(mut self, modules: Vec<Id>) -> Self {
        self.selected_modules = Some(modules);
        self
    }

    pub fn quote_status(mut self, status: QuoteStatus) -> Self {
        self.quote_status = Some(status);
        self
    }

    pub fn score(mut self, score: u8) -> Self {
        self.score = Some(score);
        self
    }

    pub fn assigned_to(mut self, name: impl Into<String>) -> Self {
        self.assigned_to = Some(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
