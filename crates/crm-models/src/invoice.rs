//! Invoice model (read-only)

use chrono::NaiveDate;
use crm_core::traits::{Entity, Id, Identifiable};
use crm_core::types::Amount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Id,
    pub client: String,
    pub amount: Amount,
    pub issue_date: NaiveDate,
    pub status: InvoiceStatus,
}

impl Identifiable for Invoice {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Invoice {
    const TYPE_NAME: &'static str = "Invoice";
}

impl Invoice {
    pub fn new(
        id: impl Into<Id>,
        client: impl Into<String>,
        amount: Amount,
        issue_date: NaiveDate,
        status: InvoiceStatus,
    ) -> Self {
        Self {
            id: id.into(),
            client: client.into(),
            amount,
            issue_date,
            status,
        }
    }
}
