//! Create/update contract for leads

use std::collections::HashSet;

use crm_auth::Action;
use crm_core::error::ValidationErrors;
use crm_models::{Id, Lead};

use crate::base::{
    model_errors, require_action, validate_phone, validate_presence, ActorContext, Contract,
    ValidationResult,
};

/// Contract for writing a lead (create or full replace after a patch)
pub struct LeadContract<'a, A: ActorContext> {
    actor: &'a A,
    /// Known catalog ids; selected modules must reference one of these
    catalog: Option<HashSet<Id>>,
}

impl<'a, A: ActorContext> LeadContract<'a, A> {
    pub fn new(actor: &'a A) -> Self {
        Self {
            actor,
            catalog: None,
        }
    }

    pub fn with_catalog<I>(mut self, module_ids: I) -> Self
    where
        I: IntoIterator<Item = Id>,
    {
        self.catalog = Some(module_ids.into_iter().collect());
        self
    }

    fn validate_modules(&self, lead: &Lead, errors: &mut ValidationErrors) {
        let Some(ref catalog) = self.catalog else {
            return;
        };
        for module_id in &lead.selected_modules {
            if !catalog.contains(module_id) {
                errors.add("selected_modules", format!("references unknown module {module_id}"));
            }
        }
    }

    pub fn actor(&self) -> &'a A {
        self.actor
    }
}

impl<'a, A: ActorContext> Contract<Lead> for LeadContract<'a, A> {
    fn validate(&self, lead: &Lead) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        require_action(
            self.actor,
            Action::ManageLeads,
            "You are not authorized to manage leads",
            &mut errors,
        );

        validate_presence("name", &lead.name, &mut errors);
        if let Some(ref phone) = lead.phone {
            validate_phone("phone", phone, &mut errors);
        }
        // blank name is already reported above
        let mut derived = model_errors(lead);
        derived.errors.remove("name");
        errors.merge(derived);

        self.validate_modules(lead, &mut errors);

        errors.into_result()
    }

    fn is_writable(&self, attribute: &str) -> bool {
        // activities are append-only and go through the activity log
        !matches!(attribute, "id" | "activities")
    }
}
