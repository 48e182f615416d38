//! Follow-up due dates, lead ownership and commission estimates
//!
//! All functions are pure over the lead collection; "today" is always
//! passed in as a calendar date.

use chrono::{Duration, NaiveDate};
use crm_auth::CurrentActor;
use crm_core::types::{Amount, DateWindow};
use crm_models::{Lead, LeadStatus};

/// Next follow-up date exists and is strictly before `today`
pub fn is_overdue(lead: &Lead, today: NaiveDate) -> bool {
    lead.next_follow_up.is_some_and(|date| date < today)
}

/// Follow-up date reached and the lead is still open
pub fn is_follow_up_due(lead: &Lead, today: NaiveDate) -> bool {
    !lead.is_closed() && lead.next_follow_up.is_some_and(|date| date <= today)
}

/// Last day covered by a horizon of `horizon_days` after `today`.
/// `None` when the date would leave the calendar range.
pub fn horizon_end(today: NaiveDate, horizon_days: i64) -> Option<NaiveDate> {
    Duration::try_days(horizon_days).and_then(|span| today.checked_add_signed(span))
}

/// Open lead whose follow-up falls within the next `horizon_days` days
pub fn is_follow_up_approaching(lead: &Lead, today: NaiveDate, horizon_days: i64) -> bool {
    let (Some(start), Some(end)) = (today.succ_opt(), horizon_end(today, horizon_days)) else {
        return false;
    };
    let window = DateWindow::new(start, end);
    !lead.is_closed() && lead.next_follow_up.is_some_and(|date| window.contains(date))
}

/// Whether `lead` belongs to `actor`.
///
/// An explicit `assigned_user_id` decides on its own. Leads without one fall
/// back to matching the free-text owner: it contains the actor's first name
/// (case-insensitive) or equals the full name.
pub fn owns_lead(lead: &Lead, actor: &CurrentActor) -> bool {
    if let Some(ref owner) = lead.assigned_user_id {
        return *owner == actor.id;
    }
    let assigned = lead.assigned_to.trim();
    if assigned.is_empty() {
        return false;
    }
    if assigned == actor.name {
        return true;
    }
    let first = actor.first_name();
    !first.is_empty() && assigned.to_lowercase().contains(&first.to_lowercase())
}

pub fn leads_owned_by<'a, I>(leads: I, actor: &'a CurrentActor) -> impl Iterator<Item = &'a Lead>
where
    I: IntoIterator<Item = &'a Lead>,
    I::IntoIter: 'a,
{
    leads.into_iter().filter(move |lead| owns_lead(lead, actor))
}

/// Number of the actor's leads with a follow-up due today or earlier
pub fn todays_follow_ups<'a, I>(leads: I, actor: &CurrentActor, today: NaiveDate) -> usize
where
    I: IntoIterator<Item = &'a Lead>,
{
    leads
        .into_iter()
        .filter(|lead| owns_lead(lead, actor) && is_follow_up_due(lead, today))
        .count()
}

/// Won value attributed to the actor
pub fn won_value<'a, I>(leads: I, actor: &CurrentActor) -> Amount
where
    I: IntoIterator<Item = &'a Lead>,
{
    leads
        .into_iter()
        .filter(|lead| lead.status == LeadStatus::ClosedWon && owns_lead(lead, actor))
        .map(|lead| lead.value)
        .sum()
}

/// Won value times the actor's commission rate (percent), falling back to
/// `default_rate` when the actor has none
pub fn estimated_commission<'a, I>(leads: I, actor: &CurrentActor, default_rate: f64) -> f64
where
    I: IntoIterator<Item = &'a Lead>,
{
    let rate = actor.commission_rate.unwrap_or(default_rate);
    won_value(leads, actor) as f64 * rate / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_models::Role;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn lead(id: &str) -> Lead {
        Lead::new(id, "Client", "Co", "client@co.in", day(1))
    }

    fn sneha() -> CurrentActor {
        CurrentActor::new("u-sneha", "Sneha Verma", Role::Bda).with_commission_rate(10.0)
    }

    #[test]
    fn test_is_overdue() {
        let today = day(15);
        assert!(!is_overdue(&lead("a"), today));
        assert!(is_overdue(&lead("a").follow_up_on(day(14)), today));
        assert!(!is_overdue(&lead("a").follow_up_on(day(15)), today));
        assert!(!is_overdue(&lead("a").follow_up_on(day(16)), today));
    }

    #[test]
    fn test_closed_leads_never_due() {
        let today = day(15);
        for status in [LeadStatus::ClosedWon, LeadStatus::ClosedLost] {
            let closed = lead("a").follow_up_on(day(1)).with_status(status);
            assert!(!is_follow_up_due(&closed, today));
            assert!(!is_follow_up_approaching(&closed, day(1) - Duration::days(1), 5));
        }
        assert!(is_follow_up_due(&lead("a").follow_up_on(day(15)), today));
    }

    #[test]
    fn test_approaching_window() {
        let today = day(15);
        assert!(is_follow_up_approaching(&lead("a").follow_up_on(day(17)), today, 2));
        assert!(!is_follow_up_approaching(&lead("a").follow_up_on(day(18)), today, 2));
        assert!(!is_follow_up_approaching(&lead("a").follow_up_on(day(15)), today, 2));
        assert!(!is_follow_up_approaching(&lead("a").follow_up_on(day(17)), today, 9_999_999_999));
        assert!(!is_follow_up_approaching(&lead("a").follow_up_on(day(17)), today, i64::MAX));
        assert_eq!(horizon_end(today, i64::MAX), None);
    }

    #[test]
    fn test_owns_lead_heuristic() {
        let actor = sneha();
        assert!(owns_lead(&lead("a").assigned_to("Sneha"), &actor));
        assert!(owns_lead(&lead("a").assigned_to("sneha v."), &actor));
        assert!(owns_lead(&lead("a").assigned_to("Sneha Verma"), &actor));
        assert!(!owns_lead(&lead("a").assigned_to("Rohan"), &actor));
        assert!(!owns_lead(&lead("a"), &actor));
    }

    #[test]
    fn test_explicit_owner_wins() {
        let actor = sneha();
        let other = lead("a").assigned_to("Sneha").owned_by("u-rohan");
        assert!(!owns_lead(&other, &actor));
        let mine = lead("a").assigned_to("Rohan").owned_by("u-sneha");
        assert!(owns_lead(&mine, &actor));
    }

    #[test]
    fn test_substring_names_collide_without_owner_id() {
        let raj = CurrentActor::new("u-raj", "Raj Kumar", Role::Bda);
        assert!(owns_lead(&lead("a").assigned_to("Rajesh"), &raj));
        assert!(!owns_lead(&lead("a").assigned_to("Rajesh").owned_by("u-rajesh"), &raj));
    }

    #[test]
    fn test_commission_scenario() {
        let leads = vec![lead("a")
            .with_value(1_000_000)
            .with_status(LeadStatus::ClosedWon)
            .assigned_to("Sneha")];
        assert_eq!(estimated_commission(&leads, &sneha(), 8.0), 100_000.0);
    }

    #[test]
    fn test_commission_default_rate() {
        let actor = CurrentActor::new("u-rohan", "Rohan Das", Role::Bda);
        let leads = vec![
            lead("a").with_value(500_000).with_status(LeadStatus::ClosedWon).assigned_to("Rohan Das"),
            lead("b").with_value(900_000).with_status(LeadStatus::ProposalSent).assigned_to("Rohan"),
        ];
        assert_eq!(estimated_commission(&leads, &actor, 8.0), 40_000.0);
    }

    #[test]
    fn test_todays_follow_ups() {
        let today = day(15);
        let leads = vec![
            lead("a").assigned_to("Sneha").follow_up_on(day(15)),
            lead("b").assigned_to("Sneha").follow_up_on(day(10)),
            lead("c").assigned_to("Sneha").follow_up_on(day(16)),
            lead("d").assigned_to("Sneha").follow_up_on(day(1)).with_status(LeadStatus::ClosedWon),
            lead("e").assigned_to("Rohan").follow_up_on(day(15)),
        ];
        assert_eq!(todays_follow_ups(&leads, &sneha(), today), 2);
        assert_eq!(leads_owned_by(&leads, &sneha()).count(), 4);
    }
}
