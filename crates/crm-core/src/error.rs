//! Core error types for Agency CRM
//!
//! Every fallible operation in the workspace reports one of these.

use std::collections::HashMap;
use thiserror::Error;

/// Core error type for all CRM operations
#[derive(Error, Debug)]
pub enum CrmError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },
}

impl CrmError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        CrmError::NotFound {
            entity,
            field: "id",
            value: id.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        CrmError::Forbidden {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        CrmError::Conflict {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for the error kind
    pub fn error_code(&self) -> &'static str {
        match self {
            CrmError::NotFound { .. } => "not_found",
            CrmError::Forbidden { .. } => "forbidden",
            CrmError::Validation(_) => "validation_failed",
            CrmError::Conflict { .. } => "conflict",
            CrmError::Storage(_) => "storage_error",
            CrmError::Serialization(_) => "serialization_error",
            CrmError::ExternalService { .. } => "external_service_error",
        }
    }

    /// Whether the caller may simply retry the operation
    pub fn is_retryable(&self) -> bool {
        matches!(self, CrmError::ExternalService { .. } | CrmError::Storage(_))
    }
}

/// Validation errors collection keyed by field
#[derive(Error, Debug, Default, Clone, PartialEq)]
#[error("Validation errors: {errors:?}")]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: HashMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        let mut fields: Vec<_> = self.errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        for (field, field_messages) in fields {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }

    /// `Ok(())` when empty, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_merge() {
        let mut a = ValidationErrors::new();
        a.add("name", "can't be blank");

        let mut b = ValidationErrors::new();
        b.add("name", "is too long");
        b.add_base("Actor is not permitted");

        a.merge(b);
        assert_eq!(a.get("name").map(Vec::len), Some(2));
        assert_eq!(a.base_errors.len(), 1);
        assert_eq!(
            a.full_messages(),
            vec![
                "Actor is not permitted".to_string(),
                "name can't be blank".to_string(),
                "name is too long".to_string(),
            ]
        );
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("score", "must be between 0 and 100");
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CrmError::not_found("Lead", "l-1").error_code(), "not_found");
        assert_eq!(CrmError::conflict("dup").error_code(), "conflict");
        assert!(CrmError::Storage("disk".into()).is_retryable());
        assert!(!CrmError::forbidden("no").is_retryable());
    }
}
