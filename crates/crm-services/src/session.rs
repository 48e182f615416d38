//! Phone-number login and landing route

use crm_auth::{Route, RouteGuard, SessionState};
use crm_store::AppStore;

/// Look up `phone` among users first, then pending candidates.
/// Surrounding whitespace is ignored.
pub fn login(store: &AppStore, phone: &str) -> SessionState {
    let phone = phone.trim();
    if phone.is_empty() {
        return SessionState::Anonymous;
    }
    let session = SessionState::from(store.login_user(phone));
    match session {
        SessionState::Authenticated(ref actor) => {
            tracing::info!(user_id = %actor.id, role = %actor.role, "signed in");
        }
        SessionState::PendingApproval { ref candidate_id, .. } => {
            tracing::debug!(candidate_id = %candidate_id, "candidate awaiting approval");
        }
        SessionState::Anonymous => tracing::debug!("login failed, no such phone"),
    }
    session
}

/// Route to render for `requested` under `guard`; `None` when the session
/// shows no dashboard at all (anonymous or pending approval)
pub fn landing_route(session: &SessionState, guard: &RouteGuard, requested: &str) -> Option<Route> {
    session.actor().map(|actor| guard.resolve(actor.role, requested))
}
