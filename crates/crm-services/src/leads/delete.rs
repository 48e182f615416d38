//! Delete Service for Leads

use crm_contracts::base::ActorContext;
use crm_contracts::leads::DeleteLeadContract;
use crm_store::AppStore;

use crate::base::{check, ServiceContext};
use crate::result::ServiceResult;

/// Service for deleting leads. Deleting an absent lead succeeds with `false`.
pub struct DeleteLeadService<'a, A: ActorContext> {
    ctx: ServiceContext<'a, A>,
}

impl<'a, A: ActorContext> DeleteLeadService<'a, A> {
    pub fn new(ctx: ServiceContext<'a, A>) -> Self {
        Self { ctx }
    }

    pub fn call(self, store: &mut AppStore, id: &str) -> ServiceResult<bool> {
        let Some(lead) = store.snapshot().find_lead(id) else {
            return ServiceResult::success(false);
        };

        if let Err(failure) = check(&DeleteLeadContract::new(self.ctx.actor), lead) {
            return failure;
        }

        let deleted = store.delete_lead(id);
        if deleted {
            tracing::info!(lead_id = id, actor = self.ctx.actor.id(), "lead deleted");
        }
        ServiceResult::success(deleted)
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
    fn test_delete_is_idempotent() {
        let ceo = CurrentActor::new("u-ceo", "Rahul Mehta", Role::Ceo);
        let mut store = store();
        let ctx = ServiceContext::on(&ceo, today());

        assert_eq!(DeleteLeadService::new(ctx).call(&mut store, "lead-3").result(), Some(&true));
        assert!(store.snapshot().find_lead("lead-3").is_none());
        assert_eq!(DeleteLeadService::new(ctx).call(&mut store, "lead-3").result(), Some(&false));
    }

    #[test]
    fn test_bda_cannot_delete() {
        let bda = CurrentActor::new("u-sneha", "Sneha Verma", Role::Bda);
        let mut store = store();

        let result = DeleteLeadService::new(ServiceContext::on(&bda, today())).call(&mut store, "lead-1");
        assert!(result.is_forbidden());
        assert!(store.snapshot().find_lead("lead-1").is_some());
    }
}
