//! Immutable application state
//!
//! A `Snapshot` holds every collection in persistent vectors. Mutators take
//! `&self` and hand back a new snapshot; the receiver is never changed, and
//! unchanged collections are shared between the two.

use crm_core::error::CrmError;
use crm_core::result::CrmResult;
use crm_core::traits::{Entity, Identifiable};
use crm_models::{
    Candidate, Invoice, Lead, LeadPatch, LoginOutcome, MarketingCampaign, ModulePatch,
    Notification, Project, ProjectPatch, QuotationModule, User,
};
use im::Vector;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub(crate) users: Vector<User>,
    pub(crate) candidates: Vector<Candidate>,
    pub(crate) leads: Vector<Lead>,
    pub(crate) projects: Vector<Project>,
    pub(crate) invoices: Vector<Invoice>,
    pub(crate) modules: Vector<QuotationModule>,
    pub(crate) notifications: Vector<Notification>,
    pub(crate) campaigns: Vector<MarketingCampaign>,
}

fn position<T: Identifiable + Clone>(items: &Vector<T>, id: &str) -> Option<usize> {
    items.iter().position(|item| item.has_id(id))
}

/// Copy of `items` with the entry matching `id` changed by `f`.
/// `None` when no entry matches.
fn modified<T, F>(items: &Vector<T>, id: &str, f: F) -> Option<Vector<T>>
where
    T: Identifiable + Clone,
    F: FnOnce(&mut T),
{
    let index = position(items, id)?;
    let mut items = items.clone();
    if let Some(item) = items.get_mut(index) {
        f(item);
    }
    Some(items)
}

fn without<T: Identifiable + Clone>(items: &Vector<T>, id: &str) -> Vector<T> {
    items.iter().filter(|item| !item.has_id(id)).cloned().collect()
}

fn ensure_unique<T: Entity>(items: &Vector<T>, id: &str) -> CrmResult<()> {
    match position(items, id) {
        Some(_) => Err(CrmError::conflict(format!(
            "{} with id {} already exists",
            T::TYPE_NAME,
            id
        ))),
        None => Ok(()),
    }
}

impl Snapshot {
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn users(&self) -> &Vector<User> {
        &self.users
    }

    pub fn candidates(&self) -> &Vector<Candidate> {
        &self.candidates
    }

    pub fn leads(&self) -> &Vector<Lead> {
        &self.leads
    }

    pub fn projects(&self) -> &Vector<Project> {
        &self.projects
    }

    pub fn invoices(&self) -> &Vector<Invoice> {
        &self.invoices
    }

    pub fn modules(&self) -> &Vector<QuotationModule> {
        &self.modules
    }

    pub fn notifications(&self) -> &Vector<Notification> {
        &self.notifications
    }

    pub fn campaigns(&self) -> &Vector<MarketingCampaign> {
        &self.campaigns
    }

    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.has_id(id))
    }

    pub fn find_candidate(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.has_id(id))
    }

    pub fn find_lead(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|l| l.has_id(id))
    }

    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.has_id(id))
    }

    pub fn find_module(&self, id: &str) -> Option<&QuotationModule> {
        self.modules.iter().find(|m| m.has_id(id))
    }

    /// Whether a user or a candidate already uses `phone`
    pub fn phone_taken(&self, phone: &str) -> bool {
        self.users.iter().any(|u| u.phone == phone)
            || self.candidates.iter().any(|c| c.phone == phone)
    }

    /// First user with the phone, else the first candidate with it
    pub fn login_user(&self, phone: &str) -> Option<LoginOutcome> {
        if let Some(user) = self.users.iter().find(|u| u.phone == phone) {
            return Some(LoginOutcome::User(user.clone()));
        }
        self.candidates
            .iter()
            .find(|c| c.phone == phone)
            .map(|c| LoginOutcome::PendingCandidate(c.clone()))
    }

    // ------------------------------------------------------------------
    // Leads
    // ------------------------------------------------------------------

    /// Newest leads come first
    pub fn add_lead(&self, lead: Lead) -> CrmResult<Snapshot> {
        ensure_unique(&self.leads, &lead.id)?;
        let mut next = self.clone();
        next.leads.push_front(lead);
        Ok(next)
    }

    pub fn update_lead(&self, id: &str, patch: &LeadPatch) -> Option<Snapshot> {
        self.modify_lead(id, |lead| lead.apply(patch))
    }

    /// Apply an arbitrary change to one lead
    pub fn modify_lead<F: FnOnce(&mut Lead)>(&self, id: &str, f: F) -> Option<Snapshot> {
        let leads = modified(&self.leads, id, f)?;
        Some(Snapshot {
            leads,
            ..self.clone()
        })
    }

    pub fn delete_lead(&self, id: &str) -> Option<Snapshot> {
        position(&self.leads, id)?;
        Some(Snapshot {
            leads: without(&self.leads, id),
            ..self.clone()
        })
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    pub fn update_project(&self, id: &str, patch: &ProjectPatch) -> Option<Snapshot> {
        self.modify_project(id, |project| project.apply(patch))
    }

    pub fn modify_project<F: FnOnce(&mut Project)>(&self, id: &str, f: F) -> Option<Snapshot> {
        let projects = modified(&self.projects, id, f)?;
        Some(Snapshot {
            projects,
            ..self.clone()
        })
    }

    // ------------------------------------------------------------------
    // Quotation catalog
    // ------------------------------------------------------------------

    pub fn add_module(&self, module: QuotationModule) -> CrmResult<Snapshot> {
        ensure_unique(&self.modules, &module.id)?;
        let mut next = self.clone();
        next.modules.push_back(module);
        Ok(next)
    }

    pub fn update_module(&self, id: &str, patch: &ModulePatch) -> Option<Snapshot> {
        let modules = modified(&self.modules, id, |module| module.apply(patch))?;
        Some(Snapshot {
            modules,
            ..self.clone()
        })
    }

    pub fn delete_module(&self, id: &str) -> Option<Snapshot> {
        position(&self.modules, id)?;
        Some(Snapshot {
            modules: without(&self.modules, id),
            ..self.clone()
        })
    }

    pub(crate) fn with_modules(&self, modules: Vector<QuotationModule>) -> Snapshot {
        Snapshot {
            modules,
            ..self.clone()
        }
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub fn mark_notification_as_read(&self, id: &str) -> Option<Snapshot> {
        let notifications = modified(&self.notifications, id, Notification::mark_read)?;
        Some(Snapshot {
            notifications,
            ..self.clone()
        })
    }

    pub fn clear_all_notifications(&self) -> Snapshot {
        Snapshot {
            notifications: Vector::new(),
            ..self.clone()
        }
    }

    /// Newest notifications come first
    pub fn push_notification(&self, notification: Notification) -> CrmResult<Snapshot> {
        ensure_unique(&self.notifications, &notification.id)?;
        let mut next = self.clone();
        next.notifications.push_front(notification);
        Ok(next)
    }

    // ------------------------------------------------------------------
    // Candidates
    // ------------------------------------------------------------------

    /// `None` when the phone number is already in use
    pub fn add_candidate(&self, candidate: Candidate) -> Option<Snapshot> {
        if self.phone_taken(&candidate.phone) {
            return None;
        }
        let mut next = self.clone();
        next.candidates.push_back(candidate);
        Some(next)
    }

    /// Promote the candidate into a user with the given commission rate
    pub fn approve_candidate(&self, id: &str, commission_rate: f64) -> Option<(Snapshot, User)> {
        let candidate = self.find_candidate(id)?.clone();
        let user = candidate.promote(commission_rate);

        let mut next = Snapshot {
            candidates: without(&self.candidates, id),
            ..self.clone()
        };
        next.users.push_back(user.clone());
        Some((next, user))
    }

    pub fn reject_candidate(&self, id: &str) -> Option<(Snapshot, Candidate)> {
        let candidate = self.find_candidate(id)?.clone();
        let next = Snapshot {
            candidates: without(&self.candidates, id),
            ..self.clone()
        };
        Some((next, candidate))
    }
}

/// Assembles a snapshot from plain collections (seed data, tests)
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    pub fn users(mut self, users: impl IntoIterator<Item = User>) -> Self {
        self.snapshot.users = users.into_iter().collect();
        self
    }

    pub fn candidates(mut self, candidates: impl IntoIterator<Item = Candidate>) -> Self {
        self.snapshot.candidates = candidates.into_iter().collect();
        self
    }

    pub fn leads(mut self, leads: impl IntoIterator<Item = Lead>) -> Self {
        self.snapshot.leads = leads.into_iter().collect();
        self
    }

    pub fn projects(mut self, projects: impl IntoIterator<Item = Project>) -> Self {
        self.snapshot.projects = projects.into_iter().collect();
        self
    }

    pub fn invoices(mut self, invoices: impl IntoIterator<Item = Invoice>) -> Self {
        self.snapshot.invoices = invoices.into_iter().collect();
        self
    }

    pub fn modules(mut self, modules: impl IntoIterator<Item = QuotationModule>) -> Self {
        self.snapshot.modules = modules.into_iter().collect();
        self
    }

    pub fn notifications(mut self, notifications: impl IntoIterator<Item = Notification>) -> Self {
        self.snapshot.notifications = notifications.into_iter().collect();
        self
    }

    pub fn campaigns(mut self, campaigns: impl IntoIterator<Item = MarketingCampaign>) -> Self {
        self.snapshot.campaigns = campaigns.into_iter().collect();
        self
    }

    pub fn build(self) -> Snapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crm_models::{CandidateStatus, LeadStatus, NotificationKind, Role};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn lead(id: &str) -> Lead {
        Lead::new(id, "Priya Nair", "Nair Textiles", "priya@nairtextiles.in", day(1))
    }

    #[test]
    fn test_add_lead_prepends_and_rejects_duplicates() {
        let s0 = Snapshot::default();
        let s1 = s0.add_lead(lead("lead-1")).unwrap();
        let s2 = s1.add_lead(lead("lead-2")).unwrap();

        assert!(s0.leads().is_empty());
        assert_eq!(s2.leads()[0].id, "lead-2");
        assert_eq!(s2.leads()[1].id, "lead-1");

        let err = s2.add_lead(lead("lead-1")).unwrap_err();
        assert_eq!(err.error_code(), "conflict");
    }

    #[test]
    fn test_update_lead_leaves_original_untouched() {
        let s1 = Snapshot::builder().leads(vec![lead("lead-1")]).build();
        let s2 = s1
            .update_lead("lead-1", &LeadPatch::new().status(LeadStatus::Contacted))
            .unwrap();

        assert_eq!(s1.find_lead("lead-1").unwrap().status, LeadStatus::New);
        assert_eq!(s2.find_lead("lead-1").unwrap().status, LeadStatus::Contacted);
        assert!(s1.update_lead("missing", &LeadPatch::new()).is_none());
    }

    #[test]
    fn test_delete_lead() {
        let s1 = Snapshot::builder()
            .leads(vec![lead("lead-1"), lead("lead-2")])
            .build();
        let s2 = s1.delete_lead("lead-1").unwrap();
        assert_eq!(s2.leads().len(), 1);
        assert!(s2.delete_lead("lead-1").is_none());
    }

    #[test]
    fn test_notifications() {
        let s1 = Snapshot::builder()
            .notifications(vec![
                Notification::new("n-1", NotificationKind::Overdue, "A", "a", day(1)),
                Notification::new("n-2", NotificationKind::Other, "B", "b", day(2)),
            ])
            .build();

        let s2 = s1.mark_notification_as_read("n-2").unwrap();
        let read: Vec<bool> = s2.notifications().iter().map(|n| n.read).collect();
        assert_eq!(read, vec![false, true]);

        let s3 = s2.mark_notification_as_read("n-2").unwrap();
        assert_eq!(s3, s2);

        assert!(s3.clear_all_notifications().notifications().is_empty());
    }

    #[test]
    fn test_candidate_transitions() {
        let existing = User::new("u-1", "Sneha Verma", "sneha@agency.io", "9000000001", Role::Bda);
        let s1 = Snapshot::builder()
            .users(vec![existing])
            .candidates(vec![Candidate::new("cand-1", "Arjun", "arjun@mail.com", "9000000099")])
            .build();

        let dup = Candidate::new("cand-2", "Copy", "copy@mail.com", "9000000001");
        assert!(s1.add_candidate(dup).is_none());

        let (s2, user) = s1.approve_candidate("cand-1", 8.0).unwrap();
        assert!(s2.candidates().is_empty());
        assert_eq!(s2.users().len(), 2);
        assert_eq!(user.candidate_status, Some(CandidateStatus::Approved));

        let (s3, _) = s1.reject_candidate("cand-1").unwrap();
        assert!(s3.candidates().is_empty());
        assert_eq!(s3.users().len(), 1);
        assert!(s3.reject_candidate("cand-1").is_none());
    }

    #[test]
    fn test_login_prefers_users() {
        let s = Snapshot::builder()
            .users(vec![User::new("u-1", "Asha", "asha@agency.io", "1111111111", Role::Admin)])
            .candidates(vec![Candidate::new("cand-1", "Arjun", "arjun@mail.com", "2222222222")])
            .build();

        assert!(matches!(s.login_user("1111111111"), Some(LoginOutcome::User(_))));
        assert!(matches!(
            s.login_user("2222222222"),
            Some(LoginOutcome::PendingCandidate(_))
        ));
        assert!(s.login_user("3333333333").is_none());
    }
}
