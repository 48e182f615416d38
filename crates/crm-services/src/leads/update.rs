//! Update Service for Leads

use crm_auth::Action;
use crm_contracts::base::ActorContext;
use crm_contracts::leads::LeadContract;
use crm_models::{Lead, LeadPatch};
use crm_store::AppStore;

use crate::base::{check, ServiceContext};
use crate::result::ServiceResult;

/// Service for partial lead updates.
///
/// The patch is merged into a copy first and the merged record goes through
/// the contract, so a patch can never leave a lead invalid. An unknown id is
/// a successful no-op with no result.
pub struct UpdateLeadService<'a, A: ActorContext> {
    ctx: ServiceContext<'a, A>,
}

impl<'a, A: ActorContext> UpdateLeadService<'a, A> {
    pub fn new(ctx: ServiceContext<'a, A>) -> Self {
        Self { ctx }
    }

    pub fn call(self, store: &mut AppStore, id: &str, patch: &LeadPatch) -> ServiceResult<Option<Lead>> {
        if let Err(denied) = self
            .ctx
            .authorize(Action::ManageLeads, "You are not authorized to manage leads")
        {
            return denied;
        }

        let Some(current) = store.snapshot().find_lead(id) else {
            tracing::debug!(lead_id = id, "update skipped, lead not found");
            return ServiceResult::success(None);
        };

        let mut merged = current.clone();
        merged.apply(patch);

        let contract = LeadContract::new(self.ctx.actor)
            .with_catalog(store.snapshot().modules().iter().map(|m| m.id.clone()));
        if let Err(failure) = check(&contract, &merged) {
            return failure;
        }

        if patch.status.is_some_and(|status| status != current.status) {
            tracing::info!(lead_id = id, from = current.status.as_str(), to = merged.status.as_str(), "lead moved");
        }

        store.update_lead(id, patch);
        ServiceResult::success(store.snapshot().find_lead(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crm_auth::CurrentActor;
    use crm_models::{LeadStatus, Role};
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
    fn test_update_status() {
        let actor = CurrentActor::new("u-sneha", "Sneha Verma", Role::Bda);
        let mut store = store();
        let patch = LeadPatch::new().status(LeadStatus::MeetingScheduled);

        let result = UpdateLeadService::new(ServiceContext::on(&actor, today())).call(&mut store, "lead-6", &patch);
        let lead = result.result().unwrap().as_ref().unwrap();
        assert_eq!(lead.status, LeadStatus::MeetingScheduled);
        assert_eq!(store.snapshot().find_lead("lead-6").unwrap().status, LeadStatus::MeetingScheduled);
    }

    #[test]
    fn test_update_unknown_lead_is_noop() {
        let actor = CurrentActor::new("u-admin", "Asha Menon", Role::Admin);
        let mut store = store();
        let before = store.snapshot().clone();

        let result = UpdateLeadService::new(ServiceContext::on(&actor, today()))
            .call(&mut store, "lead-missing", &LeadPatch::new().score(10));
        assert!(result.is_success());
        assert_eq!(result.result(), Some(&None));
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn test_invalid_patch_leaves_lead_untouched() {
        let actor = CurrentActor::new("u-admin", "Asha Menon", Role::Admin);
        let mut store = store();
        let before = store.snapshot().find_lead("lead-1").cloned();

        let result = UpdateLeadService::new(ServiceContext::on(&actor, today()))
            .call(&mut store, "lead-1", &LeadPatch::new().score(120));
        assert!(result.errors().has_error("score"));
        assert_eq!(store.snapshot().find_lead("lead-1").cloned(), before);
    }

    #[test]
    fn test_update_forbidden_for_client() {
        let actor = CurrentActor::new("u-client", "Priya Nair", Role::Client);
        let mut store = store();
        let result = UpdateLeadService::new(ServiceContext::on(&actor, today()))
            .call(&mut store, "lead-1", &LeadPatch::new().score(10));
        assert!(result.is_forbidden());
    }
}
