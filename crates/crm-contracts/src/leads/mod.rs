//! Lead contracts

mod base;
mod delete;

pub use base::LeadContract;
pub use delete::DeleteLeadContract;
