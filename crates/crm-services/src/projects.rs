//! Project services

use crm_auth::Action;
use crm_contracts::base::ActorContext;
use crm_contracts::projects::ProjectContract;
use crm_models::{Project, ProjectPatch, Task, TaskPriority};
use crm_store::AppStore;

use crate::base::{check, ServiceContext};
use crate::result::ServiceResult;
use crate::tasks::TaskParams;

const DENIED: &str = "You are not authorized to manage projects";

/// Project updates and task board operations. Unknown ids are successful
/// no-ops.
pub struct ProjectService<'a, A: ActorContext> {
    ctx: ServiceContext<'a, A>,
}

impl<'a, A: ActorContext> ProjectService<'a, A> {
    pub fn new(ctx: ServiceContext<'a, A>) -> Self {
        Self { ctx }
    }

    pub fn update(&self, store: &mut AppStore, id: &str, patch: &ProjectPatch) -> ServiceResult<Option<Project>> {
        if let Err(denied) = self.ctx.authorize(Action::ManageProjects, DENIED) {
            return denied;
        }
        if patch.progress.is_some_and(|progress| progress > 100) {
            return ServiceResult::failure_with_error("progress", "must be between 0 and 100");
        }
        let Some(current) = store.snapshot().find_project(id) else {
            return ServiceResult::success(None);
        };

        let mut merged = current.clone();
        merged.apply(patch);
        if let Err(failure) = check(&ProjectContract::new(self.ctx.actor), &merged) {
            return failure;
        }

        store.update_project(id, patch);
        ServiceResult::success(store.snapshot().find_project(id).cloned())
    }

    pub fn add_task(&self, store: &mut AppStore, project_id: &str, params: TaskParams) -> ServiceResult<Option<Task>> {
        if let Err(denied) = self.ctx.authorize(Action::ManageProjects, DENIED) {
            return denied;
        }
        if let Err(errors) = params.validate() {
            return ServiceResult::failure(errors);
        }
        let Some(project) = store.snapshot().find_project(project_id) else {
            return ServiceResult::success(None);
        };

        let task = params.into_task(Some(project.client.clone()));
        if store.add_project_task(project_id, task.clone()) {
            ServiceResult::success(Some(task))
        } else {
            ServiceResult::success(None)
        }
    }

    pub fn toggle_task(&self, store: &mut AppStore, project_id: &str, task_id: &str) -> ServiceResult<bool> {
        if let Err(denied) = self.ctx.authorize(Action::ManageProjects, DENIED) {
            return denied;
        }
        ServiceResult::success(store.toggle_project_task(project_id, task_id))
    }

    pub fn set_task_priority(
        &self,
        store: &mut AppStore,
        project_id: &str,
        task_id: &str,
        priority: TaskPriority,
    ) -> ServiceResult<bool> {
        if let Err(denied) = self.ctx.authorize(Action::ManageProjects, DENIED) {
            return denied;
        }
        ServiceResult::success(store.set_project_task_priority(project_id, task_id, priority))
    }

    pub fn delete_task(&self, store: &mut AppStore, project_id: &str, task_id: &str) -> ServiceResult<bool> {
        if let Err(denied) = self.ctx.authorize(Action::ManageProjects, DENIED) {
            return denied;
        }
        ServiceResult::success(store.delete_project_task(project_id, task_id))
    }
}
