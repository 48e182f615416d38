//! Notification services
//!
//! Besides mark-read and clear-all, follow-up reminders are derived from the
//! lead pipeline: an open lead whose follow-up date has passed raises an
//! overdue notification, one falling within the horizon an approaching one.
//! Reminder ids are derived from lead and date so repeated syncs on the same
//! day do not duplicate them.

use chrono::NaiveDate;
use crm_auth::Action;
use crm_contracts::base::ActorContext;
use crm_models::{Lead, Notification, NotificationKind};
use crm_store::AppStore;

use crate::base::ServiceContext;
use crate::follow_ups::horizon_end;
use crate::result::ServiceResult;

const DENIED: &str = "You are not authorized to manage notifications";

/// Reminders for every open lead with a follow-up on or before
/// `today + horizon_days`; an out-of-range horizon ends today
pub fn follow_up_notifications<'a, I>(leads: I, today: NaiveDate, horizon_days: i64) -> Vec<Notification>
where
    I: IntoIterator<Item = &'a Lead>,
{
    let horizon = horizon_end(today, horizon_days).unwrap_or(today);
    leads
        .into_iter()
        .filter(|lead| !lead.is_closed())
        .filter_map(|lead| {
            let due = lead.next_follow_up?;
            if due < today {
                Some(Notification::new(
                    format!("notif-overdue-{}-{}", lead.id, due),
                    NotificationKind::Overdue,
                    "Follow-up overdue",
                    format!("{} ({}) was due on {}", lead.name, lead.company, due),
                    today,
                ))
            } else if due <= horizon {
                let title = if due == today { "Follow-up due today" } else { "Follow-up approaching" };
                Some(Notification::new(
                    format!("notif-approaching-{}-{}", lead.id, due),
                    NotificationKind::Approaching,
                    title,
                    format!("{} ({}) on {}", lead.name, lead.company, due),
                    today,
                ))
            } else {
                None
            }
        })
        .collect()
}

pub struct NotificationService<'a, A: ActorContext> {
    ctx: ServiceContext<'a, A>,
}

impl<'a, A: ActorContext> NotificationService<'a, A> {
    pub fn new(ctx: ServiceContext<'a, A>) -> Self {
        Self { ctx }
    }

    /// `false` when no notification has that id
    pub fn mark_read(&self, store: &mut AppStore, id: &str) -> ServiceResult<bool> {
        if let Err(denied) = self.ctx.authorize(Action::ManageNotifications, DENIED) {
            return denied;
        }
        ServiceResult::success(store.mark_notification_as_read(id))
    }

    pub fn clear_all(&self, store: &mut AppStore) -> ServiceResult<()> {
        if let Err(denied) = self.ctx.authorize(Action::ManageNotifications, DENIED) {
            return denied;
        }
        store.clear_all_notifications();
        ServiceResult::success(())
    }

    /// Push follow-up reminders not yet in the store; returns how many were
    /// added. Does nothing when the context has notifications turned off.
    pub fn sync_follow_ups(&self, store: &mut AppStore, horizon_days: i64) -> ServiceResult<usize> {
        if let Err(denied) = self.ctx.authorize(Action::ManageNotifications, DENIED) {
            return denied;
        }
        if !self.ctx.send_notifications {
            return ServiceResult::success(0);
        }

        let pending: Vec<Notification> = follow_up_notifications(store.snapshot().leads(), self.ctx.today, horizon_days)
            .into_iter()
            .filter(|n| store.snapshot().notifications().iter().all(|existing| existing.id != n.id))
            .collect();

        let mut added = 0;
        for notification in pending {
            if let Err(err) = store.push_notification(notification) {
                return ServiceResult::from_error(err);
            }
            added += 1;
        }
        tracing::debug!(added, "follow-up reminders synced");
        ServiceResult::success(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_auth::CurrentActor;
    use crm_models::{LeadStatus, Role};
    use crm_store::seed::seed_snapshot;
    use crm_store::MemoryStorage;
    use std::sync::Arc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn lead(id: &str, follow_up: NaiveDate) -> Lead {
        Lead::new(id, "Kiran Shah", "Shah Textiles", "kiran@shahtex.in", day(1)).follow_up_on(follow_up)
    }

    #[test]
    fn test_follow_up_notifications() {
        let leads = vec![
            lead("a", day(10)),
            lead("b", day(15)),
            lead("c", day(17)),
            lead("d", day(30)),
            lead("e", day(1)).with_status(LeadStatus::ClosedWon),
            Lead::new("f", "No Date", "Co", "f@co.in", day(1)),
        ];
        let notifications = follow_up_notifications(&leads, day(15), 3);
        let kinds: Vec<_> = notifications.iter().map(|n| (n.id.as_str(), n.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("notif-overdue-a-2024-06-10", NotificationKind::Overdue),
                ("notif-approaching-b-2024-06-15", NotificationKind::Approaching),
                ("notif-approaching-c-2024-06-17", NotificationKind::Approaching),
            ]
        );
        assert_eq!(notifications[1].title, "Follow-up due today");
        assert!(notifications.iter().all(|n| !n.read && n.date == day(15)));
    }

    #[test]
    fn test_out_of_range_horizon_ends_today() {
        let leads = vec![lead("a", day(10)), lead("b", day(15)), lead("c", day(17))];
        let ids: Vec<_> = follow_up_notifications(&leads, day(15), 9_999_999_999)
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["notif-overdue-a-2024-06-10", "notif-approaching-b-2024-06-15"]);
    }

    #[test]
    fn test_sync_is_idempotent() {
        let admin = CurrentActor::new("u-admin", "Asha Menon", Role::Admin);
        let mut store = AppStore::new(seed_snapshot(day(15)), Arc::new(MemoryStorage::new()));
        let service = NotificationService::new(ServiceContext::on(&admin, day(15)));

        let added = *service.sync_follow_ups(&mut store, 2).result().unwrap();
        // lead-1 due today, lead-3 overdue, lead-4 tomorrow
        assert_eq!(added, 3);
        assert_eq!(service.sync_follow_ups(&mut store, 2).result(), Some(&0));

        let quiet = NotificationService::new(ServiceContext::on(&admin, day(16)).without_notifications());
        assert_eq!(quiet.sync_follow_ups(&mut store, 2).result(), Some(&0));
    }

    #[test]
    fn test_mark_read_and_clear() {
        let bda = CurrentActor::new("u-sneha", "Sneha Verma", Role::Bda);
        let mut store = AppStore::new(seed_snapshot(day(15)), Arc::new(MemoryStorage::new()));
        let service = NotificationService::new(ServiceContext::on(&bda, day(15)));

        assert_eq!(service.mark_read(&mut store, "notif-2").result(), Some(&true));
        assert_eq!(service.mark_read(&mut store, "notif-missing").result(), Some(&false));
        let read: Vec<_> = store.snapshot().notifications().iter().filter(|n| n.read).map(|n| n.id.clone()).collect();
        assert_eq!(read, vec!["notif-2".to_string()]);

        assert!(service.clear_all(&mut store).is_success());
        assert!(store.snapshot().notifications().is_empty());
    }

    #[test]
    fn test_candidates_cannot_touch_notifications() {
        let candidate = CurrentActor::new("cand-mock-1", "Aditya Kulkarni", Role::Candidate);
        let mut store = AppStore::new(seed_snapshot(day(15)), Arc::new(MemoryStorage::new()));
        let result = NotificationService::new(ServiceContext::on(&candidate, day(15))).clear_all(&mut store);
        assert!(result.is_forbidden());
        assert_eq!(store.snapshot().notifications().len(), 3);
    }
}
