//! Contract for approving or rejecting an application

use crm_auth::Action;
use crm_core::error::ValidationErrors;
use crm_models::Candidate;

use crate::base::{require_action, ActorContext, Contract, ValidationResult};

/// Only the admin may move a candidate out of PENDING
pub struct ReviewCandidateContract<'a, A: ActorContext> {
    actor: &'a A,
}

impl<'a, A: ActorContext> ReviewCandidateContract<'a, A> {
    pub fn new(actor: &'a A) -> Self {
        Self { actor }
    }
}

impl<'a, A: ActorContext> Contract<Candidate> for ReviewCandidateContract<'a, A> {
    fn validate(&self, candidate: &Candidate) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        require_action(
            self.actor,
            Action::ReviewCandidates,
            "Only administrators can review candidates",
            &mut errors,
        );

        if !candidate.is_pending() {
            errors.add("candidate_status", "has already been reviewed");
        }

        errors.into_result()
    }

    fn is_writable(&self, attribute: &str) -> bool {
        attribute == "candidate_status"
    }
}
