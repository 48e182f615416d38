//! Core traits shared by every record type

use uuid::Uuid;

/// Primary key type. Records are keyed by opaque strings (seed data uses
/// readable ids such as `cand-mock-1`, new records get UUIDs).
pub type Id = String;

/// Trait for records that have a primary key
pub trait Identifiable {
    fn id(&self) -> &str;

    fn has_id(&self, id: &str) -> bool {
        self.id() == id
    }
}

/// Base trait for all domain entities
pub trait Entity: Identifiable + Clone + Send + Sync {
    /// Human-readable type name for error messages and logs
    const TYPE_NAME: &'static str;
}

/// Generate a fresh collision-resistant identifier with the given prefix
pub fn generate_id(prefix: &str) -> Id {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}
