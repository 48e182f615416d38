//! The signed-in actor
//!
//! `CurrentActor` is the acting user handed to contracts and services.
//! `SessionState` is what a phone-number login leaves behind.

use crm_core::traits::Id;
use crm_models::{Candidate, LoginOutcome, Role, User};
use serde::Serialize;

use crate::navigation::{visible_navigation, NavEntry};
use crate::policy::{is_allowed, Action};

/// Acting user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentActor {
    pub id: Id,
    pub name: String,
    pub role: Role,
    pub commission_rate: Option<f64>,
}

impl CurrentActor {
    pub fn new(id: impl Into<Id>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            commission_rate: None,
        }
    }

    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
            commission_rate: user.commission_rate,
        }
    }

    pub fn with_commission_rate(mut self, rate: f64) -> Self {
        self.commission_rate = Some(rate);
        self
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn can(&self, action: Action) -> bool {
        is_allowed(self.role, action)
    }

    pub fn navigation(&self) -> Vec<NavEntry> {
        visible_navigation(self.role)
    }
}

impl From<&User> for CurrentActor {
    fn from(user: &User) -> Self {
        Self::from_user(user)
    }
}

/// Session after a login attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Authenticated(CurrentActor),
    /// Applicant awaiting review; only the pending-approval screen is shown
    PendingApproval { candidate_id: Id, name: String },
    Anonymous,
}

impl SessionState {
    pub fn actor(&self) -> Option<&CurrentActor> {
        match self {
            Self::Authenticated(actor) => Some(actor),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::PendingApproval { .. })
    }

    fn pending(candidate: &Candidate) -> Self {
        Self::PendingApproval {
            candidate_id: candidate.id.clone(),
            name: candidate.name.clone(),
        }
    }
}

impl From<Option<LoginOutcome>> for SessionState {
    fn from(outcome: Option<LoginOutcome>) -> Self {
        match outcome {
            Some(LoginOutcome::User(user)) => Self::Authenticated(CurrentActor::from_user(&user)),
            Some(LoginOutcome::PendingCandidate(candidate)) => Self::pending(&candidate),
            None => Self::Anonymous,
        }
    }
}
