//! Base contract system

use std::sync::LazyLock;

use crm_auth::{is_allowed, Action, CurrentActor};
use crm_core::error::ValidationErrors;
use crm_models::Role;
use regex::Regex;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Phone numbers: digits with optional leading `+`, spaces or dashes
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{5,18}[0-9]$").unwrap());

/// The acting user as seen by contracts
pub trait ActorContext: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn role(&self) -> Role;

    fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    fn allowed(&self, action: Action) -> bool {
        is_allowed(self.role(), action)
    }
}

impl ActorContext for CurrentActor {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> Role {
        self.role
    }
}

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;

    /// Check if an attribute is writable
    fn is_writable(&self, _attribute: &str) -> bool {
        true
    }
}

/// Add a base error unless `actor` may perform `action`
pub fn require_action<A: ActorContext>(
    actor: &A,
    action: Action,
    message: &str,
    errors: &mut ValidationErrors,
) {
    if !actor.allowed(action) {
        errors.add_base(message);
    }
}

pub fn validate_presence(field: &str, value: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(field, "can't be blank");
    } else if value.len() > 255 {
        errors.add(field, "is too long (maximum is 255 characters)");
    }
}

pub fn validate_phone(field: &str, phone: &str, errors: &mut ValidationErrors) {
    if phone.trim().is_empty() {
        errors.add(field, "can't be blank");
    } else if !PHONE_PATTERN.is_match(phone.trim()) {
        errors.add(field, "is not a valid phone number");
    }
}

/// Fold derive-based `validator` errors into the field map
pub fn model_errors<T: validator::Validate>(entity: &T) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if let Err(failures) = entity.validate() {
        for (field, field_errors) in failures.field_errors() {
            for error in field_errors {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => describe_code(&error.code),
                };
                errors.add(field, message);
            }
        }
    }
    errors
}

fn describe_code(code: &str) -> String {
    match code {
        "email" => "is not a valid email address".to_string(),
        "length" => "has an invalid length".to_string(),
        "range" => "is out of range".to_string(),
        other => format!("is invalid ({other})"),
    }
}
