//! Base service plumbing

use chrono::NaiveDate;
use crm_auth::Action;
use crm_contracts::base::{ActorContext, Contract};

use crate::result::ServiceResult;

/// Who is calling and on which calendar day
pub struct ServiceContext<'a, A: ActorContext> {
    pub actor: &'a A,
    pub today: NaiveDate,
    pub send_notifications: bool,
}

impl<'a, A: ActorContext> ServiceContext<'a, A> {
    /// Context dated with the local calendar day
    pub fn new(actor: &'a A) -> Self {
        Self::on(actor, crm_core::types::today())
    }

    pub fn on(actor: &'a A, today: NaiveDate) -> Self {
        Self {
            actor,
            today,
            send_notifications: true,
        }
    }

    pub fn without_notifications(mut self) -> Self {
        self.send_notifications = false;
        self
    }

    /// A forbidden failure unless the actor may perform `action`
    pub fn authorize<T>(&self, action: Action, message: &str) -> Result<(), ServiceResult<T>> {
        if self.actor.allowed(action) {
            Ok(())
        } else {
            tracing::debug!(actor = self.actor.id(), ?action, "action denied");
            Err(ServiceResult::forbidden(message))
        }
    }
}

impl<'a, A: ActorContext> Clone for ServiceContext<'a, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, A: ActorContext> Copy for ServiceContext<'a, A> {}

/// Run `contract` and turn a failure into a service result. Failures made
/// only of base errors (permission) are reported as forbidden.
pub fn check<T, C, R>(contract: &C, entity: &T) -> Result<(), ServiceResult<R>>
where
    C: Contract<T>,
{
    match contract.validate(entity) {
        Ok(()) => Ok(()),
        Err(errors) if errors.errors.is_empty() => {
            Err(ServiceResult::forbidden(errors.base_errors.join(", ")))
        }
        Err(errors) => Err(ServiceResult::failure(errors)),
    }
}
