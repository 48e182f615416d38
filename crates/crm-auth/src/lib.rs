//! # crm-auth
//!
//! Role-based access policy for Agency CRM.
//!
//! ## Features
//!
//! - Navigation visibility per role
//! - Route guard with redirect-to-dashboard semantics
//! - Permitted actions per role
//! - Session state derived from a phone-number login

pub mod actor;
pub mod navigation;
pub mod policy;

pub use actor::{CurrentActor, SessionState};
pub use navigation::{can_access_route, visible_navigation, NavEntry, Route, RouteGuard};
pub use policy::{is_allowed, permitted_actions, Action};
