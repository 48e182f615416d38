//! Service result type
//!
//! Every service call answers with a `ServiceResult`: a value on success,
//! field-keyed `ValidationErrors` on failure. Store-level `CrmError`s are
//! folded into base errors so callers only deal with one shape.

use crm_core::error::{CrmError, ValidationErrors};
use std::fmt;

#[derive(Debug)]
pub struct ServiceResult<T> {
    success: bool,
    result: Option<T>,
    errors: ValidationErrors,
    /// Machine-readable kind of failure, e.g. `forbidden`
    error_code: Option<&'static str>,
}

impl<T> ServiceResult<T> {
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: ValidationErrors::new(),
            error_code: None,
        }
    }

    pub fn failure(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            result: None,
            errors,
            error_code: Some("validation_failed"),
        }
    }

    pub fn failure_with_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        Self::failure(errors)
    }

    /// The actor may not perform the operation
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::from_error(CrmError::forbidden(message))
    }

    pub fn from_error(error: CrmError) -> Self {
        let code = error.error_code();
        let errors = match error {
            CrmError::Validation(errors) => errors,
            CrmError::Forbidden { message } => {
                let mut errors = ValidationErrors::new();
                errors.add_base(message);
                errors
            }
            other => {
                let mut errors = ValidationErrors::new();
                errors.add_base(other.to_string());
                errors
            }
        };
        Self {
            error_code: Some(code),
            ..Self::failure(errors)
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }

    pub fn is_forbidden(&self) -> bool {
        self.error_code == Some("forbidden")
    }

    pub fn error_code(&self) -> Option<&'static str> {
        self.error_code
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn take_result(&mut self) -> Option<T> {
        self.result.take()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.errors.full_messages()
    }

    pub fn map<U, F>(self, f: F) -> ServiceResult<U>
    where
        F: FnOnce(T) -> U,
    {
        ServiceResult {
            success: self.success,
            result: if self.success { self.result.map(f) } else { None },
            errors: self.errors,
            error_code: self.error_code,
        }
    }

    /// Chain with another service call if successful
    pub fn and_then<U, F>(self, f: F) -> ServiceResult<U>
    where
        F: FnOnce(T) -> ServiceResult<U>,
    {
        match (self.success, self.result) {
            (true, Some(result)) => f(result),
            _ => ServiceResult {
                success: false,
                result: None,
                errors: self.errors,
                error_code: self.error_code,
            },
        }
    }
}

impl<T> From<Result<T, ValidationErrors>> for ServiceResult<T> {
    fn from(result: Result<T, ValidationErrors>) -> Self {
        match result {
            Ok(value) => ServiceResult::success(value),
            Err(errors) => ServiceResult::failure(errors),
        }
    }
}

impl<T> From<Result<T, CrmError>> for ServiceResult<T> {
    fn from(result: Result<T, CrmError>) -> Self {
        match result {
            Ok(value) => ServiceResult::success(value),
            Err(error) => ServiceResult::from_error(error),
        }
    }
}

impl<T: fmt::Display> fmt::Display for ServiceResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            match self.result {
                Some(ref result) => write!(f, "Success: {}", result),
                None => write!(f, "Success"),
            }
        } else {
            write!(f, "Failure: {}", self.errors.full_messages().join(", "))
        }
    }
}
