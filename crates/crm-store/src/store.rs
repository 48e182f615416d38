//! The application state holder
//!
//! `AppStore` owns the current `Snapshot` and replaces it on every
//! mutation. Mutations of an unknown id are silent no-ops (reported through
//! the returned `bool`). Catalog mutations are written through to the
//! key-value storage before the new snapshot is published.

use std::sync::Arc;

use crm_core::result::CrmResult;
use crm_core::types::DEFAULT_COMMISSION_RATE;
use crm_models::{
    Activity, Candidate, Lead, LeadPatch, LoginOutcome, ModulePatch, Notification, ProjectPatch,
    QuotationModule, Task, TaskPriority, User,
};
use im::Vector;

use crate::seed::default_catalog;
use crate::snapshot::Snapshot;
use crate::storage::KeyValueStore;

/// Storage key of the serialized quotation catalog
pub const MODULES_KEY: &str = "quotation_modules";

pub struct AppStore {
    snapshot: Snapshot,
    storage: Arc<dyn KeyValueStore>,
    commission_rate: f64,
}

impl std::fmt::Debug for AppStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore")
            .field("snapshot", &self.snapshot)
            .field("commission_rate", &self.commission_rate)
            .finish_non_exhaustive()
    }
}

/// Catalog from storage when present and parseable, otherwise the default
pub fn load_catalog(storage: &dyn KeyValueStore) -> Vector<QuotationModule> {
    let raw = match storage.get(MODULES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("no stored catalog, using defaults");
            return default_catalog().into_iter().collect();
        }
        Err(err) => {
            tracing::warn!(error = %err, "catalog read failed, using defaults");
            return default_catalog().into_iter().collect();
        }
    };

    match serde_json::from_str::<Vec<QuotationModule>>(&raw) {
        Ok(modules) => {
            tracing::debug!(count = modules.len(), "loaded stored catalog");
            modules.into_iter().collect()
        }
        Err(err) => {
            tracing::warn!(error = %err, "stored catalog is malformed, using defaults");
            default_catalog().into_iter().collect()
        }
    }
}

impl AppStore {
    /// Start from `seed`, replacing its catalog with the stored one
    pub fn new(seed: Snapshot, storage: Arc<dyn KeyValueStore>) -> Self {
        let modules = load_catalog(storage.as_ref());
        Self {
            snapshot: seed.with_modules(modules),
            storage,
            commission_rate: DEFAULT_COMMISSION_RATE,
        }
    }

    /// Commission rate given to approved candidates
    pub fn with_commission_rate(mut self, rate: f64) -> Self {
        self.commission_rate = rate;
        self
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn commission_rate(&self) -> f64 {
        self.commission_rate
    }

    fn publish(&mut self, next: Option<Snapshot>) -> bool {
        match next {
            Some(next) => {
                self.snapshot = next;
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Leads
    // ------------------------------------------------------------------

    pub fn add_lead(&mut self, lead: Lead) -> CrmResult<()> {
        let id = lead.id.clone();
        self.snapshot = self.snapshot.add_lead(lead)?;
        tracing::debug!(lead_id = %id, "lead added");
        Ok(())
    }

    pub fn update_lead(&mut self, id: &str, patch: &LeadPatch) -> bool {
        let next = self.snapshot.update_lead(id, patch);
        self.publish_or_miss("lead", id, next)
    }

    pub fn delete_lead(&mut self, id: &str) -> bool {
        let next = self.snapshot.delete_lead(id);
        self.publish_or_miss("lead", id, next)
    }

    pub fn add_lead_activity(&mut self, id: &str, activity: Activity) -> bool {
        let next = self.snapshot.modify_lead(id, |lead| lead.log_activity(activity));
        self.publish_or_miss("lead", id, next)
    }

    pub fn add_lead_task(&mut self, id: &str, task: Task) -> bool {
        let next = self.snapshot.modify_lead(id, |lead| lead.add_task(task));
        self.publish_or_miss("lead", id, next)
    }

    pub fn toggle_lead_task(&mut self, id: &str, task_id: &str) -> bool {
        let mut found = false;
        let next = self.snapshot.modify_lead(id, |lead| found = lead.toggle_task(task_id));
        self.publish_task_change("lead", id, task_id, next, found)
    }

    pub fn set_lead_task_priority(&mut self, id: &str, task_id: &str, priority: TaskPriority) -> bool {
        let mut found = false;
        let next = self
            .snapshot
            .modify_lead(id, |lead| found = lead.set_task_priority(task_id, priority));
        self.publish_task_change("lead", id, task_id, next, found)
    }

    pub fn delete_lead_task(&mut self, id: &str, task_id: &str) -> bool {
        let mut found = false;
        let next = self.snapshot.modify_lead(id, |lead| found = lead.delete_task(task_id));
        self.publish_task_change("lead", id, task_id, next, found)
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    pub fn update_project(&mut self, id: &str, patch: &ProjectPatch) -> bool {
        let next = self.snapshot.update_project(id, patch);
        self.publish_or_miss("project", id, next)
    }

    pub fn add_project_task(&mut self, id: &str, task: Task) -> bool {
        let next = self.snapshot.modify_project(id, |project| project.add_task(task));
        self.publish_or_miss("project", id, next)
    }

    pub fn toggle_project_task(&mut self, id: &str, task_id: &str) -> bool {
        let mut found = false;
        let next = self
            .snapshot
            .modify_project(id, |project| found = project.toggle_task(task_id));
        self.publish_task_change("project", id, task_id, next, found)
    }

    pub fn set_project_task_priority(
        &mut self,
        id: &str,
        task_id: &str,
        priority: TaskPriority,
    ) -> bool {
        let mut found = false;
        let next = self
            .snapshot
            .modify_project(id, |project| found = project.set_task_priority(task_id, priority));
        self.publish_task_change("project", id, task_id, next, found)
    }

    pub fn delete_project_task(&mut self, id: &str, task_id: &str) -> bool {
        let mut found = false;
        let next = self
            .snapshot
            .modify_project(id, |project| found = project.delete_task(task_id));
        self.publish_task_change("project", id, task_id, next, found)
    }

    // ------------------------------------------------------------------
    // Quotation catalog (write-through)
    // ------------------------------------------------------------------

    pub fn add_module(&mut self, module: QuotationModule) -> CrmResult<()> {
        let next = self.snapshot.add_module(module)?;
        self.persist_and_publish(next)
    }

    pub fn update_module(&mut self, id: &str, patch: &ModulePatch) -> CrmResult<bool> {
        match self.snapshot.update_module(id, patch) {
            Some(next) => self.persist_and_publish(next).map(|_| true),
            None => Ok(self.miss("module", id)),
        }
    }

    pub fn delete_module(&mut self, id: &str) -> CrmResult<bool> {
        match self.snapshot.delete_module(id) {
            Some(next) => self.persist_and_publish(next).map(|_| true),
            None => Ok(self.miss("module", id)),
        }
    }

    fn persist_and_publish(&mut self, next: Snapshot) -> CrmResult<()> {
        let modules: Vec<&QuotationModule> = next.modules().iter().collect();
        let payload = serde_json::to_string(&modules)?;
        self.storage.set(MODULES_KEY, &payload)?;
        tracing::debug!(count = modules.len(), "catalog persisted");
        self.snapshot = next;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub fn mark_notification_as_read(&mut self, id: &str) -> bool {
        let next = self.snapshot.mark_notification_as_read(id);
        self.publish_or_miss("notification", id, next)
    }

    pub fn clear_all_notifications(&mut self) {
        self.snapshot = self.snapshot.clear_all_notifications();
    }

    pub fn push_notification(&mut self, notification: Notification) -> CrmResult<()> {
        self.snapshot = self.snapshot.push_notification(notification)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Candidates and login
    // ------------------------------------------------------------------

    /// `false` when the phone number is already taken; the application is
    /// dropped without error
    pub fn add_candidate(&mut self, candidate: Candidate) -> bool {
        let id = candidate.id.clone();
        let next = self.snapshot.add_candidate(candidate);
        if next.is_none() {
            tracing::debug!(candidate_id = %id, "phone already registered, application dropped");
        }
        self.publish(next)
    }

    /// The promoted user, or `None` when no candidate has that id
    pub fn approve_candidate(&mut self, id: &str) -> Option<User> {
        match self.snapshot.approve_candidate(id, self.commission_rate) {
            Some((next, user)) => {
                self.snapshot = next;
                tracing::info!(user_id = %user.id, "candidate approved");
                Some(user)
            }
            None => {
                self.miss("candidate", id);
                None
            }
        }
    }

    pub fn reject_candidate(&mut self, id: &str) -> Option<Candidate> {
        match self.snapshot.reject_candidate(id) {
            Some((next, candidate)) => {
                self.snapshot = next;
                tracing::info!(candidate_id = %id, "candidate rejected");
                Some(candidate)
            }
            None => {
                self.miss("candidate", id);
                None
            }
        }
    }

    pub fn login_user(&self, phone: &str) -> Option<LoginOutcome> {
        self.snapshot.login_user(phone)
    }

    fn publish_or_miss(&mut self, entity: &'static str, id: &str, next: Option<Snapshot>) -> bool {
        if self.publish(next) {
            true
        } else {
            self.miss(entity, id)
        }
    }

    /// Publish a task edit only when both the owner and the task exist
    fn publish_task_change(
        &mut self,
        entity: &'static str,
        id: &str,
        task_id: &str,
        next: Option<Snapshot>,
        found: bool,
    ) -> bool {
        match next {
            None => self.miss(entity, id),
            Some(_) if !found => self.miss("task", task_id),
            next => self.publish(next),
        }
    }

    fn miss(&self, entity: &'static str, id: &str) -> bool {
        tracing::debug!(entity, id, "no match, mutation skipped");
        false
    }
}
