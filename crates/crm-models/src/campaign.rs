//! Marketing campaign model

use chrono::NaiveDate;
use crm_core::traits::{Entity, Id, Identifiable};
use crm_core::types::Amount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingCampaign {
    pub id: Id,
    pub name: String,
    /// Channel tag, e.g. "Google Ads", "LinkedIn"
    pub channel: String,
    pub status: CampaignStatus,
    pub budget: Amount,
    pub spent: Amount,
    pub leads_generated: u32,
    pub conversions: u32,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Identifiable for MarketingCampaign {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for MarketingCampaign {
    const TYPE_NAME: &'static str = "MarketingCampaign";
}

impl MarketingCampaign {
    /// Spend per generated lead; `None` until the campaign produced a lead
    pub fn cost_per_lead(&self) -> Option<f64> {
        if self.leads_generated == 0 {
            None
        } else {
            Some(self.spent as f64 / self.leads_generated as f64)
        }
    }

    /// Conversions as a percentage of generated leads
    pub fn conversion_rate(&self) -> f64 {
        if self.leads_generated == 0 {
            0.0
        } else {
            self.conversions as f64 * 100.0 / self.leads_generated as f64
        }
    }

    pub fn remaining_budget(&self) -> Amount {
        self.budget.saturating_sub(self.spent)
    }
}
