//! # crm-models
//!
//! Domain models for Agency CRM.
//!
//! Plain record shapes and their enumerated status/role fields. Records are
//! cloned into immutable snapshots by `crm-store`, so everything here is
//! `Clone` and serde-serializable.

pub use crm_core::traits::{Entity, Id, Identifiable};

pub mod campaign;
pub mod invoice;
pub mod lead;
pub mod notification;
pub mod project;
pub mod quotation;
pub mod role;
pub mod task;
pub mod user;

pub use campaign::{CampaignStatus, MarketingCampaign};
pub use invoice::{Invoice, InvoiceStatus};
pub use lead::{Activity, ActivityType, Lead, LeadPatch, LeadPriority, LeadStatus, QuoteStatus};
pub use notification::{Notification, NotificationKind};
pub use project::{Project, ProjectPatch, ProjectStatus};
pub use quotation::{ModulePatch, QuotationModule};
pub use role::{ParseRoleError, Role};
pub use task::{Task, TaskPriority, TaskStatus};
pub use user::{Candidate, CandidateStatus, LoginOutcome, User};
