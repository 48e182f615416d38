//! Result type aliases

use crate::error::CrmError;

/// Standard Result type for CRM operations
pub type CrmResult<T> = Result<T, CrmError>;

/// Turns a lookup miss into a `NotFound` error
pub trait OptionExt<T> {
    fn or_not_found(self, entity: &'static str, id: &str) -> CrmResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_not_found(self, entity: &'static str, id: &str) -> CrmResult<T> {
        self.ok_or_else(|| CrmError::not_found(entity, id))
    }
}
