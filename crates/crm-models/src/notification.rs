//! Notification model
//!
//! In-app notifications (bell icon). Only mark-read and clear-all mutate
//! them once created.

use chrono::NaiveDate;
use crm_core::traits::{Entity, Id, Identifiable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// A follow-up date has passed
    Overdue,
    /// A follow-up date is coming up
    Approaching,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Id,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub read: bool,
}

impl Identifiable for Notification {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Notification {
    const TYPE_NAME: &'static str = "Notification";
}

impl Notification {
    pub fn new(
        id: impl Into<Id>,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            message: message.into(),
            date,
            read: false,
        }
    }

    pub fn is_unread(&self) -> bool {
        !self.read
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}
