//! Business context handed to the model alongside a question

use std::fmt;

use crm_auth::CurrentActor;
use crm_core::types::format_amount;
use crm_models::LeadPriority;
use crm_services::dashboard::DashboardMetrics;
use crm_store::Snapshot;

/// Plain-text facts about the agency, one per line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusinessContext {
    agency: String,
    facts: Vec<(String, String)>,
}

impl BusinessContext {
    pub fn new(agency: impl Into<String>) -> Self {
        Self {
            agency: agency.into(),
            facts: Vec::new(),
        }
    }

    pub fn with_fact(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.facts.push((label.into(), value.into()));
        self
    }

    /// Headline figures from the dashboard
    pub fn from_metrics(agency: impl Into<String>, currency: &str, metrics: &DashboardMetrics) -> Self {
        Self::new(agency).with_metrics(currency, metrics)
    }

    fn with_metrics(self, currency: &str, metrics: &DashboardMetrics) -> Self {
        let mut context = self
            .with_fact("Open pipeline value", format_amount(metrics.open_pipeline_value, currency))
            .with_fact("Won revenue", format_amount(metrics.won_revenue, currency))
            .with_fact("Lead conversion rate", format!("{:.1}%", metrics.conversion_rate))
            .with_fact("Outstanding invoices", format_amount(metrics.invoices.outstanding(), currency))
            .with_fact("Overdue invoices", format_amount(metrics.invoices.overdue, currency))
            .with_fact(
                "Active projects",
                format!("{} ({} late)", metrics.active_projects, metrics.late_projects),
            );
        for stage in metrics.pipeline.iter().filter(|stage| stage.count > 0) {
            context = context.with_fact(
                format!("Leads in {}", stage.status.label()),
                format!("{} worth {}", stage.count, format_amount(stage.value, currency)),
            );
        }
        if let Some(cpl) = metrics.cost_per_lead {
            context = context.with_fact("Marketing cost per lead", format!("{currency}{cpl:.0}"));
        }
        context
    }

    /// Dashboard figures plus who is asking, the hot leads by name and the
    /// titles of active projects
    pub fn for_actor(
        agency: impl Into<String>,
        currency: &str,
        actor: &CurrentActor,
        snapshot: &Snapshot,
        metrics: &DashboardMetrics,
    ) -> Self {
        let hot_leads: Vec<String> = snapshot
            .leads()
            .iter()
            .filter(|lead| lead.priority == LeadPriority::Hot)
            .map(|lead| format!("{} ({})", lead.name, lead.company))
            .collect();
        let active_projects: Vec<&str> = snapshot
            .projects()
            .iter()
            .filter(|project| project.is_active())
            .map(|project| project.title.as_str())
            .collect();

        Self::new(agency)
            .with_fact("Asked by", format!("{} ({})", actor.name, actor.role))
            .with_metrics(currency, metrics)
            .with_fact("Hot leads", list_or_none(&hot_leads))
            .with_fact("Active project titles", list_or_none(&active_projects))
    }

    pub fn agency(&self) -> &str {
        &self.agency
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

fn list_or_none<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for BusinessContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Agency: {}", self.agency)?;
        for (label, value) in &self.facts {
            writeln!(f, "- {label}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crm_core::types::DEFAULT_COMMISSION_RATE;
    use crm_models::Role;
    use crm_store::seed::seed_snapshot;

    #[test]
    fn test_render() {
        let context = BusinessContext::new("Pixel Agency").with_fact("Won revenue", "₹1,000,000");
        assert_eq!(context.to_string(), "Agency: Pixel Agency\n- Won revenue: ₹1,000,000\n");
    }

    #[test]
    fn test_from_metrics() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let ceo = CurrentActor::new("u-ceo", "Rahul Mehta", Role::Ceo);
        let metrics = DashboardMetrics::compute(&seed_snapshot(today), &ceo, today, DEFAULT_COMMISSION_RATE);

        let rendered = BusinessContext::from_metrics("Pixel Agency", "₹", &metrics).to_string();
        assert!(rendered.contains("- Won revenue: ₹1,000,000"));
        assert!(rendered.contains("- Leads in Closed Won: 1 worth ₹1,000,000"));
        assert!(rendered.contains("- Marketing cost per lead: ₹1125"));
    }

    #[test]
    fn test_for_actor_names_people_and_projects() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let snapshot = seed_snapshot(today);
        let ceo = CurrentActor::new("u-ceo", "Rahul Mehta", Role::Ceo);
        let metrics = DashboardMetrics::compute(&snapshot, &ceo, today, DEFAULT_COMMISSION_RATE);

        let rendered = BusinessContext::for_actor("Pixel Agency", "₹", &ceo, &snapshot, &metrics).to_string();
        assert!(rendered.starts_with("Agency: Pixel Agency\n"));
        assert!(rendered.contains(&format!("- Asked by: Rahul Mehta ({})", Role::Ceo)));
        assert!(rendered.contains("- Hot leads: Priya Nair (Nair Textiles), Imran Sheikh (Sheikh Logistics)"));
        assert!(rendered.contains(
            "- Active project titles: Storefront Revamp, Fleet Tracker App, Clinic Booking Portal"
        ));
        assert!(!rendered.contains("Brand Refresh"));
        assert!(rendered.contains("- Won revenue: ₹1,000,000"));
    }
}
