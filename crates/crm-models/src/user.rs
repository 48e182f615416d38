//! User and candidate models
//!
//! A candidate is an applicant with the same shape as a user plus a review
//! status and application timestamp. Approval turns it into a `User`.

use chrono::{DateTime, Utc};
use crm_core::traits::{Entity, Id, Identifiable};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::role::Role;

/// Review state of an applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// User entity
///
/// Created from seed data or by promoting a candidate. Never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    /// Phone number, unique across users and candidates
    #[validate(length(min = 1, max = 32))]
    pub phone: String,

    pub role: Role,

    /// Commission percentage for sales roles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub commission_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Set on users promoted from a candidate application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_status: Option<CandidateStatus>,
}

impl Identifiable for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for User {
    const TYPE_NAME: &'static str = "User";
}

impl User {
    pub fn new(
        id: impl Into<Id>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            role,
            commission_rate: None,
            avatar: None,
            candidate_status: None,
        }
    }

    pub fn with_commission_rate(mut self, rate: f64) -> Self {
        self.commission_rate = Some(rate);
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// First whitespace-separated token of the display name
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Commission rate, falling back to `default` when unset
    pub fn commission_rate_or(&self, default: f64) -> f64 {
        self.commission_rate.unwrap_or(default)
    }
}

/// Candidate entity (pending applicant)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Id,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 32))]
    pub phone: String,

    /// Always `Role::Candidate` while the application is open
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    pub candidate_status: CandidateStatus,

    pub applied_at: DateTime<Utc>,
}

impl Identifiable for Candidate {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Candidate {
    const TYPE_NAME: &'static str = "Candidate";
}

impl Candidate {
    /// New pending application stamped with the current time
    pub fn new(
        id: impl Into<Id>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            role: Role::Candidate,
            avatar: None,
            candidate_status: CandidateStatus::Pending,
            applied_at: Utc::now(),
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn applied_at(mut self, at: DateTime<Utc>) -> Self {
        self.applied_at = at;
        self
    }

    pub fn is_pending(&self) -> bool {
        self.candidate_status == CandidateStatus::Pending
    }

    /// Materialize the approved user: every candidate field is carried over,
    /// then role, status and commission rate are overwritten.
    pub fn promote(self, commission_rate: f64) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: Role::SALES_REP,
            commission_rate: Some(commission_rate),
            avatar: self.avatar,
            candidate_status: Some(CandidateStatus::Approved),
        }
    }
}

/// Result of a phone-number login lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// An active user
    User(User),
    /// An applicant still awaiting review; the UI shows a pending screen
    PendingCandidate(Candidate),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name() {
        let user = User::new("u-1", "Sneha Verma", "sneha@agency.io", "9000000001", Role::Bda);
        assert_eq!(user.first_name(), "Sneha");
        assert_eq!(user.commission_rate_or(8.0), 8.0);
        assert_eq!(user.with_commission_rate(10.0).commission_rate_or(8.0), 10.0);
    }

    #[test]
    fn test_promote_candidate() {
        let candidate = Candidate::new("cand-1", "Arjun Rao", "arjun@mail.com", "9000000099")
            .with_avatar("arjun.png");
        let user = candidate.promote(8.0);

        assert_eq!(user.id, "cand-1");
        assert_eq!(user.name, "Arjun Rao");
        assert_eq!(user.phone, "9000000099");
        assert_eq!(user.role, Role::Bda);
        assert_eq!(user.commission_rate, Some(8.0));
        assert_eq!(user.candidate_status, Some(CandidateStatus::Approved));
        assert_eq!(user.avatar.as_deref(), Some("arjun.png"));
    }

    #[test]
    fn test_user_validation() {
        let user = User::new("u-2", "", "not-an-email", "9000000002", Role::Admin);
        let errors = user.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_candidate_serde_shape() {
        let candidate = Candidate::new("cand-2", "Meera", "meera@mail.com", "9000000100");
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["candidateStatus"], "PENDING");
        assert_eq!(json["role"], "CANDIDATE");
        assert!(json.get("appliedAt").is_some());
    }
}
