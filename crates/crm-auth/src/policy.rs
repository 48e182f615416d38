//! Action permissions
//!
//! Actions are checked by the service layer before any mutation reaches the
//! store. Route visibility lives in `navigation`; this table covers what a
//! role may *do* once it is on a screen.

use std::collections::BTreeSet;

use crm_models::Role;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ViewLeads,
    ManageLeads,
    DeleteLeads,
    ReviewCandidates,
    ManageCatalog,
    ManageProjects,
    ViewFinance,
    ViewMarketing,
    ManageNotifications,
    UseAdvisor,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::ViewLeads,
        Action::ManageLeads,
        Action::DeleteLeads,
        Action::ReviewCandidates,
        Action::ManageCatalog,
        Action::ManageProjects,
        Action::ViewFinance,
        Action::ViewMarketing,
        Action::ManageNotifications,
        Action::UseAdvisor,
    ];
}

/// Check whether `role` may perform `action`
pub fn is_allowed(role: Role, action: Action) -> bool {
    match action {
        Action::ViewLeads | Action::ManageLeads => {
            role.is_executive() || role.is_sales() || role.is_admin_group()
        }
        Action::DeleteLeads => role.is_executive() || role == Role::Admin,
        // Approval is the admin's call alone
        Action::ReviewCandidates => role == Role::Admin,
        Action::ManageCatalog => role.is_executive() || role.is_admin_group(),
        Action::ManageProjects => {
            role.is_executive() || matches!(role, Role::ProjectManager | Role::Admin)
        }
        Action::ViewFinance => {
            role.is_executive() || matches!(role, Role::FinanceManager | Role::Admin | Role::Client)
        }
        Action::ViewMarketing => {
            role.is_executive() || matches!(role, Role::MarketingManager | Role::Admin)
        }
        Action::ManageNotifications | Action::UseAdvisor => role != Role::Candidate,
    }
}

/// Every action `role` may perform
pub fn permitted_actions(role: Role) -> BTreeSet<Action> {
    Action::ALL
        .into_iter()
        .filter(|action| is_allowed(role, *action))
        .collect()
}
