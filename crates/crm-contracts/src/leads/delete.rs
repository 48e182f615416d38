//! Delete contract for leads

use crm_auth::Action;
use crm_core::error::ValidationErrors;
use crm_models::Lead;

use crate::base::{require_action, ActorContext, Contract, ValidationResult};

/// Hard deletion is reserved to executives and the admin
pub struct DeleteLeadContract<'a, A: ActorContext> {
    actor: &'a A,
}

impl<'a, A: ActorContext> DeleteLeadContract<'a, A> {
    pub fn new(actor: &'a A) -> Self {
        Self { actor }
    }
}

impl<'a, A: ActorContext> Contract<Lead> for DeleteLeadContract<'a, A> {
    fn validate(&self, _lead: &Lead) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        require_action(
            self.actor,
            Action::DeleteLeads,
            "You are not authorized to delete leads",
            &mut errors,
        );
        errors.into_result()
    }

    fn is_writable(&self, _attribute: &str) -> bool {
        false
    }
}
