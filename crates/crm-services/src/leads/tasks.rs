//! Follow-up tasks on leads

use crm_auth::Action;
use crm_contracts::base::ActorContext;
use crm_models::{Task, TaskPriority};
use crm_store::AppStore;

use crate::base::ServiceContext;
use crate::result::ServiceResult;
use crate::tasks::TaskParams;

const DENIED: &str = "You are not authorized to manage leads";

/// Task operations on a lead. Unknown lead or task ids are successful
/// no-ops reported as `false` / `None`.
pub struct LeadTaskService<'a, A: ActorContext> {
    ctx: ServiceContext<'a, A>,
}

impl<'a, A: ActorContext> LeadTaskService<'a, A> {
    pub fn new(ctx: ServiceContext<'a, A>) -> Self {
        Self { ctx }
    }

    /// The created task; the lead's company is recorded as the task client
    pub fn add_task(&self, store: &mut AppStore, lead_id: &str, params: TaskParams) -> ServiceResult<Option<Task>> {
        if let Err(denied) = self.ctx.authorize(Action::ManageLeads, DENIED) {
            return denied;
        }
        if let Err(errors) = params.validate() {
            return ServiceResult::failure(errors);
        }
        let Some(lead) = store.snapshot().find_lead(lead_id) else {
            return ServiceResult::success(None);
        };

        let task = params.into_task(Some(lead.company.clone()));
        if store.add_lead_task(lead_id, task.clone()) {
            ServiceResult::success(Some(task))
        } else {
            ServiceResult::success(None)
        }
    }

    pub fn toggle_task(&self, store: &mut AppStore, lead_id: &str, task_id: &str) -> ServiceResult<bool> {
        if let Err(denied) = self.ctx.authorize(Action::ManageLeads, DENIED) {
            return denied;
        }
        ServiceResult::success(store.toggle_lead_task(lead_id, task_id))
    }

    pub fn set_priority(
        &self,
        store: &mut AppStore,
        lead_id: &str,
        task_id: &str,
        priority: TaskPriority,
    ) -> ServiceResult<bool> {
        if let Err(denied) = self.ctx.authorize(Action::ManageLeads, DENIED) {
            return denied;
        }
        ServiceResult::success(store.set_lead_task_priority(lead_id, task_id, priority))
    }

    pub fn delete_task(&self, store: &mut AppStore, lead_id: &str, task_id: &str) -> ServiceResult<bool> {
        if let Err(denied) = self.ctx.authorize(Action::ManageLeads, DENIED) {
            return denied;
        }
        ServiceResult::success(store.delete_lead_task(lead_id, task_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crm_auth::CurrentActor;
    use crm_models::{Role, TaskStatus};
    use crm_store::seed::seed_snapshot;
    use crm_store::MemoryStorage;
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn store() -> AppStore {
        AppStore::new(seed_snapshot(today()), Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_task_lifecycle() {
        let bda = CurrentActor::new("u-sneha", "Sneha Verma", Role::Bda);
        let service = LeadTaskService::new(ServiceContext::on(&bda, today()));
        let mut store = store();

        let created = service.add_task(
            &mut store,
            "lead-4",
            TaskParams::new("Send site photos", "Rohan Das", today()).with_priority(TaskPriority::High),
        );
        let task = created.result().unwrap().clone().unwrap();
        assert_eq!(task.client.as_deref(), Some("Mathew Realty"));

        assert_eq!(service.toggle_task(&mut store, "lead-4", &task.id).result(), Some(&true));
        let stored = &store.snapshot().find_lead("lead-4").unwrap().tasks[0];
        assert_eq!(stored.status, TaskStatus::Done);

        assert_eq!(
            service.set_priority(&mut store, "lead-4", &task.id, TaskPriority::Low).result(),
            Some(&true)
        );
        assert_eq!(service.delete_task(&mut store, "lead-4", &task.id).result(), Some(&true));
        assert!(store.snapshot().find_lead("lead-4").unwrap().tasks.is_empty());
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let admin = CurrentActor::new("u-admin", "Asha Menon", Role::Admin);
        let service = LeadTaskService::new(ServiceContext::on(&admin, today()));
        let mut store = store();

        assert_eq!(service.toggle_task(&mut store, "lead-1", "task-missing").result(), Some(&false));
        assert_eq!(service.delete_task(&mut store, "lead-missing", "task-lead-1").result(), Some(&false));
        let added = service.add_task(&mut store, "lead-missing", TaskParams::new("Call", "Asha", today()));
        assert_eq!(added.result(), Some(&None));
    }

    #[test]
    fn test_blank_title_and_forbidden() {
        let admin = CurrentActor::new("u-admin", "Asha Menon", Role::Admin);
        let mut store = store();
        let result = LeadTaskService::new(ServiceContext::on(&admin, today()))
            .add_task(&mut store, "lead-1", TaskParams::new(" ", "Asha", today()));
        assert!(result.errors().has_error("title"));

        let dev = CurrentActor::new("u-dev", "Karan Joshi", Role::Developer);
        let result = LeadTaskService::new(ServiceContext::on(&dev, today())).toggle_task(&mut store, "lead-1", "task-lead-1");
        assert!(result.is_forbidden());
    }
}
