//! Quotations built from a lead's selected catalog modules
//!
//! NOT_GENERATED -> DRAFT on generate, DRAFT -> SENT on send. Sending moves
//! the lead to PROPOSAL_SENT and records a QUOTATION activity.

use crm_auth::Action;
use crm_contracts::base::ActorContext;
use crm_core::types::{group_thousands, Amount};
use crm_models::{Activity, ActivityType, Lead, LeadPatch, LeadStatus, QuotationModule, QuoteStatus};
use crm_store::AppStore;

use crate::base::ServiceContext;
use crate::onboarding::modules_value;
use crate::result::ServiceResult;

const DENIED: &str = "You are not authorized to manage leads";

/// Catalog entries selected on the lead, in catalog order
pub fn quote_lines<'a, I>(lead: &Lead, catalog: I) -> Vec<&'a QuotationModule>
where
    I: IntoIterator<Item = &'a QuotationModule>,
{
    catalog
        .into_iter()
        .filter(|module| lead.selected_modules.contains(&module.id))
        .collect()
}

pub fn quote_total<'a, I>(lead: &Lead, catalog: I) -> Amount
where
    I: IntoIterator<Item = &'a QuotationModule>,
{
    modules_value(&lead.selected_modules, catalog)
}

pub struct QuoteService<'a, A: ActorContext> {
    ctx: ServiceContext<'a, A>,
}

impl<'a, A: ActorContext> QuoteService<'a, A> {
    pub fn new(ctx: ServiceContext<'a, A>) -> Self {
        Self { ctx }
    }

    /// Draft a quote; the lead value is reset to the quote total
    pub fn generate(&self, store: &mut AppStore, lead_id: &str) -> ServiceResult<Option<Lead>> {
        if let Err(denied) = self.ctx.authorize(Action::ManageLeads, DENIED) {
            return denied;
        }
        let Some(lead) = store.snapshot().find_lead(lead_id) else {
            return ServiceResult::success(None);
        };
        if lead.selected_modules.is_empty() {
            return ServiceResult::failure_with_error("selected_modules", "must include at least one module");
        }

        let total = quote_total(lead, store.snapshot().modules());
        let patch = LeadPatch::new().quote_status(QuoteStatus::Draft).value(total);
        store.update_lead(lead_id, &patch);
        tracing::debug!(lead_id, total, "quote drafted");
        ServiceResult::success(store.snapshot().find_lead(lead_id).cloned())
    }

    pub fn send(&self, store: &mut AppStore, lead_id: &str) -> ServiceResult<Option<Lead>> {
        if let Err(denied) = self.ctx.authorize(Action::ManageLeads, DENIED) {
            return denied;
        }
        let Some(lead) = store.snapshot().find_lead(lead_id) else {
            return ServiceResult::success(None);
        };
        if lead.quote_status == QuoteStatus::NotGenerated {
            return ServiceResult::failure_with_error("quote_status", "must be generated before sending");
        }

        let lines = quote_lines(lead, store.snapshot().modules());
        let names: Vec<&str> = lines.iter().map(|module| module.name.as_str()).collect();
        let total: Amount = lines.iter().map(|module| module.price).sum();
        let note = format!("Quotation sent: {} ({})", names.join(", "), group_thousands(total));

        let patch = LeadPatch::new()
            .quote_status(QuoteStatus::Sent)
            .status(LeadStatus::ProposalSent);
        store.update_lead(lead_id, &patch);
        store.add_lead_activity(lead_id, Activity::new(ActivityType::Quotation, self.ctx.today, note));

        tracing::info!(lead_id, total, "quote sent");
        ServiceResult::success(store.snapshot().find_lead(lead_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crm_auth::CurrentActor;
    use crm_models::Role;
    use crm_store::seed::seed_snapshot;
    use crm_store::MemoryStorage;
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn store() -> AppStore {
        AppStore::new(seed_snapshot(today()), Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_quote_total() {
        let store = store();
        let lead = store.snapshot().find_lead("lead-1").unwrap();
        assert_eq!(quote_total(lead, store.snapshot().modules()), 60_000);
        let names: Vec<_> = quote_lines(lead, store.snapshot().modules()).iter().map(|m| m.id.clone()).collect();
        assert_eq!(names, vec!["mod-web".to_string(), "mod-seo".to_string()]);
    }

    #[test]
    fn test_generate_then_send() {
        let bda = CurrentActor::new("u-rohan", "Rohan Das", Role::Bda);
        let service = QuoteService::new(ServiceContext::on(&bda, today()));
        let mut store = store();
        store.update_lead("lead-4", &LeadPatch::new().selected_modules(vec!["mod-app".into(), "mod-crm".into()]));

        let not_ready = service.send(&mut store, "lead-4");
        assert!(not_ready.errors().has_error("quote_status"));

        let drafted = service.generate(&mut store, "lead-4");
        let lead = drafted.result().unwrap().as_ref().unwrap();
        assert_eq!(lead.quote_status, QuoteStatus::Draft);
        assert_eq!(lead.value, 150_000);

        let sent = service.send(&mut store, "lead-4");
        let lead = sent.result().unwrap().as_ref().unwrap();
        assert_eq!(lead.quote_status, QuoteStatus::Sent);
        assert_eq!(lead.status, LeadStatus::ProposalSent);
        let last = lead.recent_activities().next().unwrap();
        assert_eq!(last.activity_type, ActivityType::Quotation);
        assert_eq!(last.note, "Quotation sent: Mobile App, CRM Integration (150,000)");
    }

    #[test]
    fn test_generate_requires_modules() {
        let bda = CurrentActor::new("u-sneha", "Sneha Verma", Role::Bda);
        let mut store = store();
        let result = QuoteService::new(ServiceContext::on(&bda, today())).generate(&mut store, "lead-6");
        assert!(result.errors().has_error("selected_modules"));
        assert_eq!(store.snapshot().find_lead("lead-6").unwrap().quote_status, QuoteStatus::NotGenerated);
    }
}
