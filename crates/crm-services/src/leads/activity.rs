//! Activity logging for leads

use chrono::NaiveDate;
use crm_auth::Action;
use crm_contracts::base::ActorContext;
use crm_core::error::ValidationErrors;
use crm_models::{Activity, ActivityType, Lead, LeadPatch};
use crm_store::AppStore;

use crate::base::ServiceContext;
use crate::result::ServiceResult;

#[derive(Debug, Clone)]
pub struct ActivityParams {
    pub activity_type: ActivityType,
    pub note: String,
    /// Defaults to the context's today
    pub date: Option<NaiveDate>,
    /// Reschedule the next follow-up
    pub next_follow_up: Option<NaiveDate>,
}

impl ActivityParams {
    pub fn new(activity_type: ActivityType, note: impl Into<String>) -> Self {
        Self {
            activity_type,
            note: note.into(),
            date: None,
            next_follow_up: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn follow_up_on(mut self, date: NaiveDate) -> Self {
        self.next_follow_up = Some(date);
        self
    }
}

/// Appends an interaction to a lead's history and optionally schedules the
/// next follow-up. Returns the updated lead, `None` for an unknown id.
pub struct LogActivityService<'a, A: ActorContext> {
    ctx: ServiceContext<'a, A>,
}

impl<'a, A: ActorContext> LogActivityService<'a, A> {
    pub fn new(ctx: ServiceContext<'a, A>) -> Self {
        Self { ctx }
    }

    pub fn call(self, store: &mut AppStore, lead_id: &str, params: ActivityParams) -> ServiceResult<Option<Lead>> {
        if let Err(denied) = self
            .ctx
            .authorize(Action::ManageLeads, "You are not authorized to manage leads")
        {
            return denied;
        }

        let date = params.date.unwrap_or(self.ctx.today);
        let mut errors = ValidationErrors::new();
        if params.note.trim().is_empty() {
            errors.add("note", "can't be blank");
        }
        if let Some(next) = params.next_follow_up {
            if next < date {
                errors.add("next_follow_up", "must not be before the activity date");
            }
        }
        if !errors.is_empty() {
            return ServiceResult::failure(errors);
        }

        let activity = Activity::new(params.activity_type, date, params.note.trim());
        if !store.add_lead_activity(lead_id, activity) {
            return ServiceResult::success(None);
        }
        if let Some(next) = params.next_follow_up {
            store.update_lead(lead_id, &LeadPatch::new().next_follow_up(Some(next)));
        }

        tracing::debug!(lead_id, kind = ?params.activity_type, "activity logged");
        ServiceResult::success(store.snapshot().find_lead(lead_id).cloned())
    }
}
