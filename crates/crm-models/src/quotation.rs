//! Quotation module catalog entries
//!
//! A module is a named capability with a price that staff combine into a
//! client proposal. The catalog is the one persisted collection.

use crm_core::traits::{Entity, Id, Identifiable};
use crm_core::types::Amount;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuotationModule {
    pub id: Id,

    #[validate(length(min = 1, max = 120))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub price: Amount,
}

impl Identifiable for QuotationModule {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for QuotationModule {
    const TYPE_NAME: &'static str = "QuotationModule";
}

impl QuotationModule {
    pub fn new(
        id: impl Into<Id>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Amount,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    pub fn apply(&mut self, patch: &ModulePatch) {
        if let Some(ref name) = patch.name {
            self.name = name.clone();
        }
        if let Some(ref description) = patch.description {
            self.description = description.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }
}

/// Partial update for a catalog entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Amount>,
}

impl ModulePatch {
    pub fn price(price: Amount) -> Self {
        Self {
            price: Some(price),
            ..Default::default()
        }
    }
}
