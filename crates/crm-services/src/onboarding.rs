//! Client onboarding intake
//!
//! The onboarding form captures a client's details and the catalog modules
//! they want. It lands in the pipeline as a NEW lead valued at the sum of
//! the selected module prices.

use crm_contracts::base::ActorContext;
use crm_core::types::Amount;
use crm_models::{Activity, ActivityType, Id, Lead, LeadPriority, QuotationModule};
use crm_store::AppStore;

use crate::base::ServiceContext;
use crate::leads::{CreateLeadService, LeadParams};
use crate::result::ServiceResult;

pub const ONBOARDING_SOURCE: &str = "Onboarding Form";

const HOT_THRESHOLD: Amount = 200_000;
const WARM_THRESHOLD: Amount = 50_000;

#[derive(Debug, Clone, Default)]
pub struct OnboardingSubmission {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: Option<String>,
    pub selected_modules: Vec<Id>,
    /// Free-form requirements, logged as the lead's first activity
    pub requirements: Option<String>,
    pub assigned_to: Option<String>,
}

impl OnboardingSubmission {
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

    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Id>,
    {
        self.selected_modules = modules.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.requirements = Some(requirements.into());
        self
    }

    pub fn assigned_to(mut self, name: impl Into<String>) -> Self {
        self.assigned_to = Some(name.into());
        self
    }
}

/// Sum of catalog prices for `module_ids`; unknown ids count as zero
pub fn modules_value<'a, I>(module_ids: &[Id], catalog: I) -> Amount
where
    I: IntoIterator<Item = &'a QuotationModule>,
{
    catalog
        .into_iter()
        .filter(|module| module_ids.contains(&module.id))
        .map(|module| module.price)
        .sum()
}

pub fn priority_for(value: Amount) -> LeadPriority {
    if value >= HOT_THRESHOLD {
        LeadPriority::Hot
    } else if value >= WARM_THRESHOLD {
        LeadPriority::Warm
    } else {
        LeadPriority::Cold
    }
}

pub struct OnboardingService<'a, A: ActorContext> {
    ctx: ServiceContext<'a, A>,
}

impl<'a, A: ActorContext> OnboardingService<'a, A> {
    pub fn new(ctx: ServiceContext<'a, A>) -> Self {
        Self { ctx }
    }

    pub fn call(self, store: &mut AppStore, submission: OnboardingSubmission) -> ServiceResult<Lead> {
        let value = modules_value(&submission.selected_modules, store.snapshot().modules());

        let mut params = LeadParams::new(submission.name, submission.company, submission.email)
            .with_value(value)
            .with_priority(priority_for(value))
            .with_modules(submission.selected_modules)
            .with_source(ONBOARDING_SOURCE);
        params.phone = submission.phone;
        params.assigned_to = submission.assigned_to;

        let created = CreateLeadService::new(self.ctx).call(store, params);
        let requirements = submission
            .requirements
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        created.and_then(|lead| match requirements {
            Some(text) => {
                let activity = Activity::new(ActivityType::Requirements, self.ctx.today, text);
                store.add_lead_activity(&lead.id, activity);
                match store.snapshot().find_lead(&lead.id) {
                    Some(updated) => ServiceResult::success(updated.clone()),
                    None => ServiceResult::success(lead),
                }
            }
            None => ServiceResult::success(lead),
        })
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
    fn test_priority_thresholds() {
        assert_eq!(priority_for(200_000), LeadPriority::Hot);
        assert_eq!(priority_for(199_999), LeadPriority::Warm);
        assert_eq!(priority_for(50_000), LeadPriority::Warm);
        assert_eq!(priority_for(15_000), LeadPriority::Cold);
    }

    #[test]
    fn test_onboarding_creates_lead() {
        let bda = CurrentActor::new("u-rohan", "Rohan Das", Role::Bda);
        let mut store = store();
        let submission = OnboardingSubmission::new("Meena Iyer", "Iyer Foods", "meena@iyerfoods.in")
            .with_phone("9822222222")
            .with_modules(["mod-web", "mod-app", "mod-seo"])
            .with_requirements("Ordering app with loyalty points");

        let result = OnboardingService::new(ServiceContext::on(&bda, today())).call(&mut store, submission);
        let lead = result.result().unwrap();

        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.source, ONBOARDING_SOURCE);
        assert_eq!(lead.value, 180_000);
        assert_eq!(lead.priority, LeadPriority::Warm);
        assert_eq!(lead.assigned_to, "Rohan Das");
        assert_eq!(lead.activities.len(), 1);
        assert_eq!(lead.activities[0].activity_type, ActivityType::Requirements);
        assert_eq!(store.snapshot().leads()[0].id, lead.id);
    }

    #[test]
    fn test_unknown_module_rejected() {
        let admin = CurrentActor::new("u-admin", "Asha Menon", Role::Admin);
        let mut store = store();
        let submission =
            OnboardingSubmission::new("Meena Iyer", "Iyer Foods", "meena@iyerfoods.in").with_modules(["mod-ghost"]);

        let result = OnboardingService::new(ServiceContext::on(&admin, today())).call(&mut store, submission);
        assert!(result.errors().has_error("selected_modules"));
    }
}
