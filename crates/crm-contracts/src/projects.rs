//! Project contract

use crm_auth::Action;
use crm_core::error::ValidationErrors;
use crm_models::Project;

use crate::base::{require_action, validate_presence, ActorContext, Contract, ValidationResult};

pub struct ProjectContract<'a, A: ActorContext> {
    actor: &'a A,
}

impl<'a, A: ActorContext> ProjectContract<'a, A> {
    pub fn new(actor: &'a A) -> Self {
        Self { actor }
    }
}

impl<'a, A: ActorContext> Contract<Project> for ProjectContract<'a, A> {
    fn validate(&self, project: &Project) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        require_action(
            self.actor,
            Action::ManageProjects,
            "You are not authorized to manage projects",
            &mut errors,
        );

        validate_presence("title", &project.title, &mut errors);
        validate_presence("client", &project.client, &mut errors);
        if project.progress > 100 {
            errors.add("progress", "must be between 0 and 100");
        }

        errors.into_result()
    }

    fn is_writable(&self, attribute: &str) -> bool {
        attribute != "id"
    }
}
