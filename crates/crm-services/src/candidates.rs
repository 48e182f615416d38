//! Recruitment services
//!
//! Applications are submitted anonymously from the login screen. Approval
//! and rejection are admin-only; approval promotes the candidate into a
//! sales rep user.

use crm_auth::Action;
use crm_contracts::base::ActorContext;
use crm_contracts::candidates::{ApplicationContract, ReviewCandidateContract};
use crm_core::traits::generate_id;
use crm_models::{Candidate, Notification, NotificationKind, User};
use crm_store::AppStore;

use crate::base::{check, ServiceContext};
use crate::result::ServiceResult;

const REVIEW_DENIED: &str = "Only administrators can review candidates";

#[derive(Debug, Clone, Default)]
pub struct ApplicationParams {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
}

impl ApplicationParams {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// Files a new PENDING application.
///
/// A phone number already used by a user or another candidate drops the
/// application: the call succeeds with no result and the store is unchanged.
#[derive(Debug, Default)]
pub struct SubmitApplicationService;

impl SubmitApplicationService {
    pub fn new() -> Self {
        Self
    }

    pub fn call(&self, store: &mut AppStore, params: ApplicationParams) -> ServiceResult<Option<Candidate>> {
        let mut candidate = Candidate::new(
            generate_id("cand"),
            params.name.trim(),
            params.email.trim(),
            params.phone.trim(),
        );
        candidate.avatar = params.avatar;

        if let Err(failure) = check(&ApplicationContract::new(), &candidate) {
            return failure;
        }

        if store.add_candidate(candidate.clone()) {
            tracing::info!(candidate_id = %candidate.id, "application received");
            ServiceResult::success(Some(candidate))
        } else {
            ServiceResult::success(None)
        }
    }
}

/// Promotes a pending candidate into a user (role BDA, default commission
/// rate). An unknown id succeeds with no result.
pub struct ApproveCandidateService<'a, A: ActorContext> {
    ctx: ServiceContext<'a, A>,
}

impl<'a, A: ActorContext> ApproveCandidateService<'a, A> {
    pub fn new(ctx: ServiceContext<'a, A>) -> Self {
        Self { ctx }
    }

    pub fn call(self, store: &mut AppStore, candidate_id: &str) -> ServiceResult<Option<User>> {
        if let Err(denied) = self.ctx.authorize(Action::ReviewCandidates, REVIEW_DENIED) {
            return denied;
        }
        let Some(candidate) = store.snapshot().find_candidate(candidate_id) else {
            return ServiceResult::success(None);
        };
        if let Err(failure) = check(&ReviewCandidateContract::new(self.ctx.actor), candidate) {
            return failure;
        }

        let Some(user) = store.approve_candidate(candidate_id) else {
            return ServiceResult::success(None);
        };

        if self.ctx.send_notifications {
            let welcome = Notification::new(
                generate_id("notif"),
                NotificationKind::Other,
                "New team member",
                format!("{} joined the sales team", user.name),
                self.ctx.today,
            );
            if let Err(err) = store.push_notification(welcome) {
                tracing::warn!(error = %err, "could not record approval notification");
            }
        }

        ServiceResult::success(Some(user))
    }
}

/// Discards a pending application. An unknown id succeeds with no result.
pub struct RejectCandidateService<'a, A: ActorContext> {
    ctx: ServiceContext<'a, A>,
}

impl<'a, A: ActorContext> RejectCandidateService<'a, A> {
    pub fn new(ctx: ServiceContext<'a, A>) -> Self {
        Self { ctx }
    }

    pub fn call(self, store: &mut AppStore, candidate_id: &str) -> ServiceResult<Option<Candidate>> {
        if let Err(denied) = self.ctx.authorize(Action::ReviewCandidates, REVIEW_DENIED) {
            return denied;
        }
        let Some(candidate) = store.snapshot().find_candidate(candidate_id) else {
            return ServiceResult::success(None);
        };
        if let Err(failure) = check(&ReviewCandidateContract::new(self.ctx.actor), candidate) {
            return failure;
        }

        ServiceResult::success(store.reject_candidate(candidate_id))
    }
}
