//! Contract for a submitted application

use crm_core::error::ValidationErrors;
use crm_models::{Candidate, CandidateStatus, Role};

use crate::base::{model_errors, validate_phone, validate_presence, Contract, ValidationResult};

/// Shape checks for a new candidate. No actor is involved.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApplicationContract;

impl ApplicationContract {
    pub fn new() -> Self {
        Self
    }
}

impl Contract<Candidate> for ApplicationContract {
    fn validate(&self, candidate: &Candidate) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        validate_presence("name", &candidate.name, &mut errors);
        validate_phone("phone", &candidate.phone, &mut errors);

        let mut derived = model_errors(candidate);
        derived.errors.remove("name");
        derived.errors.remove("phone");
        errors.merge(derived);

        if candidate.role != Role::Candidate {
            errors.add("role", "must be CANDIDATE for a new application");
        }
        if candidate.candidate_status != CandidateStatus::Pending {
            errors.add("candidate_status", "must be PENDING for a new application");
        }

        errors.into_result()
    }

    fn is_writable(&self, attribute: &str) -> bool {
        matches!(attribute, "name" | "email" | "phone" | "avatar")
    }
}
