//! # crm-services
//!
//! Business logic services for Agency CRM.
//!
//! Services wrap the identity-free `AppStore` with an acting user: they
//! authorize, run contracts, then mutate the store and report through a
//! `ServiceResult`. Read-side computations (follow-ups, commission,
//! dashboard metrics) are plain functions over snapshot collections.

pub mod base;
pub mod candidates;
pub mod catalog;
pub mod dashboard;
pub mod follow_ups;
pub mod leads;
pub mod notifications;
pub mod onboarding;
pub mod projects;
pub mod quotes;
pub mod result;
pub mod session;
pub mod tasks;

pub use base::*;
pub use result::ServiceResult;
pub use tasks::TaskParams;
