//! # crm-contracts
//!
//! Contract validation for Agency CRM.
//!
//! Contracts check a record and the acting user before the service layer
//! lets a mutation reach the store. A failed contract yields
//! `ValidationErrors` keyed by field; permission failures land in the base
//! errors.

pub mod base;
pub mod candidates;
pub mod catalog;
pub mod leads;
pub mod projects;

pub use base::*;
