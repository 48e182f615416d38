//! Create Service for Leads

use crm_auth::Action;
use crm_contracts::base::ActorContext;
use crm_contracts::leads::LeadContract;
use crm_core::traits::generate_id;
use crm_models::Lead;
use crm_store::AppStore;

use super::LeadParams;
use crate::base::{check, ServiceContext};
use crate::result::ServiceResult;

/// Service for creating leads
///
/// # Example
/// ```ignore
/// let service = CreateLeadService::new(ServiceContext::new(&actor));
/// let params = LeadParams::new("Kiran Shah", "Shah Textiles", "kiran@shahtex.in")
///     .with_value(250_000)
///     .with_modules(["mod-web"]);
/// let result = service.call(&mut store, params);
/// ```
pub struct CreateLeadService<'a, A: ActorContext> {
    ctx: ServiceContext<'a, A>,
}

impl<'a, A: ActorContext> CreateLeadService<'a, A> {
    pub fn new(ctx: ServiceContext<'a, A>) -> Self {
        Self { ctx }
    }

    /// Execute the create operation
    pub fn call(self, store: &mut AppStore, params: LeadParams) -> ServiceResult<Lead> {
        if let Err(denied) = self
            .ctx
            .authorize(Action::ManageLeads, "You are not authorized to manage leads")
        {
            return denied;
        }

        let mut lead = params.into_lead(generate_id("lead"), self.ctx.today);
        self.assign_to_caller(&mut lead);

        let contract = LeadContract::new(self.ctx.actor)
            .with_catalog(store.snapshot().modules().iter().map(|m| m.id.clone()));
        if let Err(failure) = check(&contract, &lead) {
            return failure;
        }

        match store.add_lead(lead.clone()) {
            Ok(()) => {
                tracing::info!(lead_id = %lead.id, actor = self.ctx.actor.id(), "lead created");
                ServiceResult::success(lead)
            }
            Err(err) => ServiceResult::from_error(err),
        }
    }

    /// Sales reps creating an unassigned lead become its owner
    fn assign_to_caller(&self, lead: &mut Lead) {
        let actor = self.ctx.actor;
        if !lead.assigned_to.trim().is_empty() || lead.assigned_user_id.is_some() {
            return;
        }
        if actor.role().is_sales() {
            lead.assigned_to = actor.name().to_string();
            lead.assigned_user_id = Some(actor.id().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crm_models::{LeadStatus, Role};
    use crm_store::seed::seed_snapshot;
    use crm_store::MemoryStorage;
    use std::sync::Arc;

    struct MockActor {
        id: &'static str,
        name: &'static str,
        role: Role,
    }

    impl ActorContext for MockActor {
        fn id(&self) -> &str {
            self.id
        }
        fn name(&self) -> &str {
            self.name
        }
        fn role(&self) -> Role {
            self.role
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn store() -> AppStore {
        AppStore::new(seed_snapshot(today()), Arc::new(MemoryStorage::new()))
    }

    fn params() -> LeadParams {
        LeadParams::new("Kiran Shah", "Shah Textiles", "kiran@shahtex.in").with_value(250_000)
    }

    #[test]
    fn test_create_lead_as_bda_assigns_caller() {
        let actor = MockActor { id: "u-sneha", name: "Sneha Verma", role: Role::Bda };
        let mut store = store();
        let before = store.snapshot().leads().len();

        let result = CreateLeadService::new(ServiceContext::on(&actor, today())).call(&mut store, params());
        assert!(result.is_success());

        let lead = result.result().unwrap();
        assert!(lead.id.starts_with("lead-"));
        assert_eq!(lead.assigned_to, "Sneha Verma");
        assert_eq!(lead.assigned_user_id.as_deref(), Some("u-sneha"));
        assert_eq!(lead.last_contact, today());
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(store.snapshot().leads().len(), before + 1);
        assert_eq!(store.snapshot().leads()[0].id, lead.id);
    }

    #[test]
    fn test_create_lead_as_ceo_keeps_assignee() {
        let actor = MockActor { id: "u-ceo", name: "Rahul Mehta", role: Role::Ceo };
        let mut store = store();
        let result = CreateLeadService::new(ServiceContext::on(&actor, today()))
            .call(&mut store, params().assigned_to("Rohan Das"));
        assert_eq!(result.result().unwrap().assigned_to, "Rohan Das");

        let unassigned = CreateLeadService::new(ServiceContext::on(&actor, today())).call(&mut store, params());
        assert!(unassigned.result().unwrap().assigned_to.is_empty());
    }

    #[test]
    fn test_create_lead_without_permission() {
        let actor = MockActor { id: "u-dev", name: "Karan Joshi", role: Role::Developer };
        let mut store = store();
        let before = store.snapshot().clone();

        let result = CreateLeadService::new(ServiceContext::on(&actor, today())).call(&mut store, params());
        assert!(result.is_forbidden());
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn test_create_lead_validation_failure() {
        let actor = MockActor { id: "u-admin", name: "Asha Menon", role: Role::Admin };
        let mut store = store();
        let params = LeadParams::new("", "Shah Textiles", "not-an-email").with_modules(["mod-ghost"]);

        let result = CreateLeadService::new(ServiceContext::on(&actor, today())).call(&mut store, params);
        assert!(result.is_failure());
        assert!(!result.is_forbidden());
        assert!(result.errors().has_error("name"));
        assert!(result.errors().has_error("email"));
        assert!(result.errors().has_error("selected_modules"));
    }
}
