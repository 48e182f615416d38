//! Quotation catalog contract

use crm_auth::Action;
use crm_core::error::ValidationErrors;
use crm_models::QuotationModule;

use crate::base::{model_errors, require_action, validate_presence, ActorContext, Contract, ValidationResult};

pub struct ModuleContract<'a, A: ActorContext> {
    actor: &'a A,
}

impl<'a, A: ActorContext> ModuleContract<'a, A> {
    pub fn new(actor: &'a A) -> Self {
        Self { actor }
    }

    /// Permission check alone, for deletions
    pub fn validate_removal(&self) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_action(
            self.actor,
            Action::ManageCatalog,
            "You are not authorized to edit the quotation catalog",
            &mut errors,
        );
        errors.into_result()
    }
}

impl<'a, A: ActorContext> Contract<QuotationModule> for ModuleContract<'a, A> {
    fn validate(&self, module: &QuotationModule) -> ValidationResult {
        let mut errors = match self.validate_removal() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        validate_presence("name", &module.name, &mut errors);
        let mut derived = model_errors(module);
        derived.errors.remove("name");
        errors.merge(derived);

        if module.price == 0 {
            errors.add("price", "must be greater than 0");
        }

        errors.into_result()
    }
}
