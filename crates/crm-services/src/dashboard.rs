//! Dashboard metrics
//!
//! Read-only aggregates over one snapshot. Team-wide figures cover every
//! record; the personal block only counts leads the actor owns.

use chrono::NaiveDate;
use crm_auth::CurrentActor;
use crm_core::types::Amount;
use crm_models::{InvoiceStatus, LeadStatus};
use crm_store::Snapshot;
use serde::Serialize;

use crate::follow_ups::{estimated_commission, is_overdue, owns_lead, todays_follow_ups, won_value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineStage {
    pub status: LeadStatus,
    pub count: usize,
    pub value: Amount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvoiceTotals {
    pub paid: Amount,
    pub pending: Amount,
    pub overdue: Amount,
}

impl InvoiceTotals {
    pub fn outstanding(&self) -> Amount {
        self.pending + self.overdue
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalMetrics {
    pub owned_leads: usize,
    pub follow_ups_due: usize,
    pub overdue_follow_ups: usize,
    pub won_value: Amount,
    pub estimated_commission: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    /// One entry per status, in pipeline order
    pub pipeline: Vec<PipelineStage>,
    /// Value of leads not yet closed
    pub open_pipeline_value: Amount,
    pub won_revenue: Amount,
    /// CLOSED_WON leads as a percentage of all leads
    pub conversion_rate: f64,
    pub invoices: InvoiceTotals,
    pub active_projects: usize,
    pub late_projects: usize,
    pub campaign_spend: Amount,
    pub campaign_leads: u32,
    /// Total spend over total generated leads across campaigns
    pub cost_per_lead: Option<f64>,
    pub personal: PersonalMetrics,
}

impl DashboardMetrics {
    pub fn compute(snapshot: &Snapshot, actor: &CurrentActor, today: NaiveDate, default_rate: f64) -> Self {
        let leads = snapshot.leads();

        let pipeline: Vec<PipelineStage> = LeadStatus::PIPELINE
            .iter()
            .map(|&status| {
                let (count, value) = leads
                    .iter()
                    .filter(|lead| lead.status == status)
                    .fold((0, 0), |(count, value), lead| (count + 1, value + lead.value));
                PipelineStage { status, count, value }
            })
            .collect();

        let open_pipeline_value = pipeline
            .iter()
            .filter(|stage| !stage.status.is_closed())
            .map(|stage| stage.value)
            .sum();
        let won = pipeline
            .iter()
            .find(|stage| stage.status == LeadStatus::ClosedWon)
            .map_or((0, 0), |stage| (stage.count, stage.value));
        let conversion_rate = if leads.is_empty() {
            0.0
        } else {
            won.0 as f64 * 100.0 / leads.len() as f64
        };

        let mut invoices = InvoiceTotals::default();
        for invoice in snapshot.invoices() {
            match invoice.status {
                InvoiceStatus::Paid => invoices.paid += invoice.amount,
                InvoiceStatus::Pending => invoices.pending += invoice.amount,
                InvoiceStatus::Overdue => invoices.overdue += invoice.amount,
            }
        }

        let campaign_spend: Amount = snapshot.campaigns().iter().map(|c| c.spent).sum();
        let campaign_leads: u32 = snapshot.campaigns().iter().map(|c| c.leads_generated).sum();
        let cost_per_lead = (campaign_leads > 0).then(|| campaign_spend as f64 / campaign_leads as f64);

        let personal = PersonalMetrics {
            owned_leads: leads.iter().filter(|lead| owns_lead(lead, actor)).count(),
            follow_ups_due: todays_follow_ups(leads, actor, today),
            overdue_follow_ups: leads
                .iter()
                .filter(|lead| !lead.is_closed() && owns_lead(lead, actor) && is_overdue(lead, today))
                .count(),
            won_value: won_value(leads, actor),
            estimated_commission: estimated_commission(leads, actor, default_rate),
        };

        Self {
            pipeline,
            open_pipeline_value,
            won_revenue: won.1,
            conversion_rate,
            invoices,
            active_projects: snapshot.projects().iter().filter(|p| p.is_active()).count(),
            late_projects: snapshot.projects().iter().filter(|p| p.is_late(today)).count(),
            campaign_spend,
            campaign_leads,
            cost_per_lead,
            personal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_models::Role;
    use crm_store::seed::seed_snapshot;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_team_metrics_over_seed() {
        let ceo = CurrentActor::new("u-ceo", "Rahul Mehta", Role::Ceo);
        let metrics = DashboardMetrics::compute(&seed_snapshot(today()), &ceo, today(), 8.0);

        assert_eq!(metrics.pipeline.len(), 6);
        assert_eq!(metrics.pipeline[0].status, LeadStatus::New);
        assert_eq!(metrics.won_revenue, 1_000_000);
        // 450000 + 120000 + 300000 + 60000
        assert_eq!(metrics.open_pipeline_value, 930_000);
        assert!((metrics.conversion_rate - 100.0 / 6.0).abs() < 1e-9);
        assert_eq!(metrics.invoices.paid, 185_000);
        assert_eq!(metrics.invoices.outstanding(), 475_000);
        assert_eq!(metrics.active_projects, 3);
        assert_eq!(metrics.late_projects, 1);
        assert_eq!(metrics.campaign_spend, 54_000);
        assert_eq!(metrics.campaign_leads, 48);
        assert_eq!(metrics.cost_per_lead, Some(1125.0));
        assert_eq!(metrics.personal.owned_leads, 0);
    }

    #[test]
    fn test_personal_metrics_for_sneha() {
        let sneha = CurrentActor::new("u-sneha", "Sneha Verma", Role::Bda).with_commission_rate(10.0);
        let metrics = DashboardMetrics::compute(&seed_snapshot(today()), &sneha, today(), 8.0);

        // lead-1, lead-2, lead-5, lead-6
        assert_eq!(metrics.personal.owned_leads, 4);
        // lead-1 is due today; lead-2 and lead-5 are closed
        assert_eq!(metrics.personal.follow_ups_due, 1);
        assert_eq!(metrics.personal.overdue_follow_ups, 0);
        assert_eq!(metrics.personal.won_value, 1_000_000);
        assert_eq!(metrics.personal.estimated_commission, 100_000.0);
    }

    #[test]
    fn test_empty_snapshot() {
        let ceo = CurrentActor::new("u-ceo", "Rahul Mehta", Role::Ceo);
        let metrics = DashboardMetrics::compute(&Snapshot::default(), &ceo, today(), 8.0);
        assert_eq!(metrics.conversion_rate, 0.0);
        assert_eq!(metrics.cost_per_lead, None);
        assert!(metrics.pipeline.iter().all(|stage| stage.count == 0));
    }
}
