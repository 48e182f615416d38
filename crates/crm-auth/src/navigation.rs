//! Navigation visibility and route guard
//!
//! The navigation table below is the authoritative access table. The legacy
//! guard reproduces the narrower per-route checks of the old dashboard and is
//! only used when configured.

use crm_core::config::RouteGuardMode;
use crm_models::Role;
use serde::Serialize;

/// Client-side routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Route {
    Dashboard,
    Leads,
    Projects,
    Finance,
    Marketing,
    Retention,
    Settings,
    Onboarding,
    Recruitment,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Dashboard,
        Route::Leads,
        Route::Projects,
        Route::Finance,
        Route::Marketing,
        Route::Retention,
        Route::Settings,
        Route::Onboarding,
        Route::Recruitment,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Leads => "/leads",
            Self::Projects => "/projects",
            Self::Finance => "/finance",
            Self::Marketing => "/marketing",
            Self::Retention => "/retention",
            Self::Settings => "/settings",
            Self::Onboarding => "/onboarding",
            Self::Recruitment => "/recruitment",
        }
    }

    /// Match a location against the route table. Query string, fragment and
    /// a trailing slash are ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        Route::ALL.into_iter().find(|route| route.path() == path)
    }
}

/// One sidebar link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub label: &'static str,
    pub path: &'static str,
    #[serde(skip)]
    pub route: Route,
}

struct NavItem {
    label: &'static str,
    path: &'static str,
    route: Route,
    visible: fn(Role) -> bool,
}

const ADMIN_PANEL_PATH: &str = "/settings?tab=admin";

const NAVIGATION: [NavItem; 10] = [
    NavItem {
        label: "Dashboard",
        path: "/",
        route: Route::Dashboard,
        visible: |_| true,
    },
    NavItem {
        label: "Acquisition",
        path: "/leads",
        route: Route::Leads,
        visible: sees_acquisition,
    },
    NavItem {
        label: "Onboarding",
        path: "/onboarding",
        route: Route::Onboarding,
        visible: sees_acquisition,
    },
    NavItem {
        label: "Marketing",
        path: "/marketing",
        route: Route::Marketing,
        visible: |role| role.is_executive() || matches!(role, Role::MarketingManager | Role::Admin),
    },
    NavItem {
        label: "Projects",
        path: "/projects",
        route: Route::Projects,
        visible: sees_projects,
    },
    NavItem {
        label: "Retention",
        path: "/retention",
        route: Route::Retention,
        visible: |role| role.is_executive() || matches!(role, Role::ProjectManager | Role::Admin),
    },
    NavItem {
        label: "Finance",
        path: "/finance",
        route: Route::Finance,
        visible: |role| {
            role.is_executive() || matches!(role, Role::FinanceManager | Role::Admin | Role::Client)
        },
    },
    NavItem {
        label: "Recruitment",
        path: "/recruitment",
        route: Route::Recruitment,
        visible: |role| role.is_executive() || matches!(role, Role::HrManager | Role::Admin),
    },
    NavItem {
        label: "Admin Panel",
        path: ADMIN_PANEL_PATH,
        route: Route::Settings,
        visible: |role| role.is_admin_group() || matches!(role, Role::Ceo | Role::Founder),
    },
    NavItem {
        label: "System Settings",
        path: "/settings",
        route: Route::Settings,
        visible: |role| role != Role::Bda,
    },
];

fn sees_acquisition(role: Role) -> bool {
    role.is_executive() || role.is_sales() || role.is_admin_group()
}

fn sees_projects(role: Role) -> bool {
    // Clients get the same route under a different label
    !matches!(role, Role::FinanceManager | Role::Bda)
}

fn label_for(item: &NavItem, role: Role) -> &'static str {
    if item.route == Route::Projects && role == Role::Client {
        "My Projects"
    } else {
        item.label
    }
}

/// Ordered sidebar entries visible to `role`
pub fn visible_navigation(role: Role) -> Vec<NavEntry> {
    NAVIGATION
        .iter()
        .filter(|item| (item.visible)(role))
        .map(|item| NavEntry {
            label: label_for(item, role),
            path: item.path,
            route: item.route,
        })
        .collect()
}

/// Whether `role` may open `path` under the authoritative (navigation) table
pub fn can_access_route(role: Role, path: &str) -> bool {
    RouteGuard::new(RouteGuardMode::Navigation).can_access(role, path)
}

/// Route guard with a configurable authoritative table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteGuard {
    mode: RouteGuardMode,
}

impl RouteGuard {
    pub fn new(mode: RouteGuardMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> RouteGuardMode {
        self.mode
    }

    pub fn can_access(&self, role: Role, path: &str) -> bool {
        let Some(route) = Route::from_path(path) else {
            return false;
        };
        match self.mode {
            RouteGuardMode::Navigation => navigation_allows(role, route, path),
            RouteGuardMode::Legacy => legacy_allows(role, route),
        }
    }

    /// Route actually rendered for `path`: unmatched or unauthorized
    /// locations fall back to the dashboard.
    pub fn resolve(&self, role: Role, path: &str) -> Route {
        match Route::from_path(path) {
            Some(route) if self.can_access(role, path) => route,
            Some(route) => {
                tracing::debug!(%role, path, ?route, "route not permitted, redirecting to dashboard");
                Route::Dashboard
            }
            None => Route::Dashboard,
        }
    }
}

fn navigation_allows(role: Role, route: Route, path: &str) -> bool {
    // An exact entry match (e.g. the admin panel tab) decides on its own
    if let Some(item) = NAVIGATION.iter().find(|item| item.path == path) {
        return (item.visible)(role);
    }
    NAVIGATION
        .iter()
        .filter(|item| item.route == route)
        .any(|item| (item.visible)(role))
}

fn legacy_allows(role: Role, route: Route) -> bool {
    match route {
        Route::Leads => matches!(role, Role::Admin | Role::Bda),
        Route::Finance => !matches!(role, Role::Bda | Role::Developer),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(role: Role) -> Vec<&'static str> {
        visible_navigation(role).into_iter().map(|e| e.label).collect()
    }

    #[test]
    fn test_route_from_path() {
        assert_eq!(Route::from_path("/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/leads/"), Some(Route::Leads));
        assert_eq!(Route::from_path("/settings?tab=admin"), Some(Route::Settings));
        assert_eq!(Route::from_path("/finance#q3"), Some(Route::Finance));
        assert_eq!(Route::from_path("/nowhere"), None);
        assert_eq!(Route::from_path(""), None);
    }

    #[test]
    fn test_ceo_navigation() {
        assert_eq!(
            labels(Role::Ceo),
            vec![
                "Dashboard",
                "Acquisition",
                "Onboarding",
                "Marketing",
                "Projects",
                "Retention",
                "Finance",
                "Recruitment",
                "Admin Panel",
                "System Settings",
            ]
        );
    }

    #[test]
    fn test_bda_navigation() {
        assert_eq!(labels(Role::Bda), vec!["Dashboard", "Acquisition", "Onboarding"]);
    }

    #[test]
    fn test_client_sees_my_projects_and_finance() {
        let entries = visible_navigation(Role::Client);
        let projects = entries.iter().find(|e| e.route == Route::Projects).unwrap();
        assert_eq!(projects.label, "My Projects");
        assert_eq!(projects.path, "/projects");
        assert_eq!(
            labels(Role::Client),
            vec!["Dashboard", "My Projects", "Finance", "System Settings"]
        );
    }

    #[test]
    fn test_finance_manager_navigation() {
        assert_eq!(
            labels(Role::FinanceManager),
            vec!["Dashboard", "Finance", "System Settings"]
        );
    }

    #[test]
    fn test_hr_manager_navigation() {
        assert_eq!(
            labels(Role::HrManager),
            vec![
                "Dashboard",
                "Acquisition",
                "Onboarding",
                "Projects",
                "Recruitment",
                "Admin Panel",
                "System Settings",
            ]
        );
    }

    #[test]
    fn test_dashboard_visible_to_everyone() {
        for role in Role::ALL {
            assert_eq!(visible_navigation(role)[0].path, "/");
            assert!(can_access_route(role, "/"));
        }
    }

    #[test]
    fn test_navigation_guard() {
        assert!(can_access_route(Role::Ceo, "/leads"));
        assert!(!can_access_route(Role::Developer, "/leads"));
        assert!(can_access_route(Role::Client, "/finance"));
        assert!(!can_access_route(Role::Bda, "/settings"));
        assert!(can_access_route(Role::Developer, "/settings"));
        assert!(!can_access_route(Role::Developer, "/settings?tab=admin"));
        assert!(can_access_route(Role::Founder, "/settings?tab=admin"));
        assert!(!can_access_route(Role::Admin, "/unknown"));
    }

    #[test]
    fn test_legacy_guard() {
        let guard = RouteGuard::new(RouteGuardMode::Legacy);
        assert!(guard.can_access(Role::Bda, "/leads"));
        assert!(guard.can_access(Role::Admin, "/leads"));
        assert!(!guard.can_access(Role::Ceo, "/leads"));
        assert!(!guard.can_access(Role::Bda, "/finance"));
        assert!(!guard.can_access(Role::Developer, "/finance"));
        assert!(guard.can_access(Role::Client, "/finance"));
        assert!(guard.can_access(Role::Developer, "/marketing"));
    }

    #[test]
    fn test_resolve_redirects_to_dashboard() {
        let guard = RouteGuard::default();
        assert_eq!(guard.resolve(Role::Developer, "/leads"), Route::Dashboard);
        assert_eq!(guard.resolve(Role::Admin, "/leads"), Route::Leads);
        assert_eq!(guard.resolve(Role::Admin, "/does-not-exist"), Route::Dashboard);
    }

    #[test]
    fn test_every_visible_entry_is_reachable() {
        let guard = RouteGuard::default();
        for role in Role::ALL {
            for entry in visible_navigation(role) {
                assert!(guard.can_access(role, entry.path), "{role} -> {}", entry.path);
            }
        }
    }
}
