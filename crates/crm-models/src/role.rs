//! Role tags
//!
//! A closed enumeration. Access rules are expressed over the role groups
//! defined here (executives, sales, finance, admin group).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role tag carried by every user and candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Ceo,
    Founder,
    Cto,
    /// Business development associate; the sales-rep tag
    Bda,
    MarketingManager,
    FinanceManager,
    HrManager,
    Admin,
    ProjectManager,
    Developer,
    Client,
    /// Applicant awaiting admin review
    Candidate,
}

impl Role {
    pub const ALL: [Role; 12] = [
        Role::Ceo,
        Role::Founder,
        Role::Cto,
        Role::Bda,
        Role::MarketingManager,
        Role::FinanceManager,
        Role::HrManager,
        Role::Admin,
        Role::ProjectManager,
        Role::Developer,
        Role::Client,
        Role::Candidate,
    ];

    /// Role given to approved candidates
    pub const SALES_REP: Role = Role::Bda;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ceo => "CEO",
            Self::Founder => "FOUNDER",
            Self::Cto => "CTO",
            Self::Bda => "BDA",
            Self::MarketingManager => "MARKETING_MANAGER",
            Self::FinanceManager => "FINANCE_MANAGER",
            Self::HrManager => "HR_MANAGER",
            Self::Admin => "ADMIN",
            Self::ProjectManager => "PROJECT_MANAGER",
            Self::Developer => "DEVELOPER",
            Self::Client => "CLIENT",
            Self::Candidate => "CANDIDATE",
        }
    }

    /// Human-readable title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Ceo => "Chief Executive Officer",
            Self::Founder => "Founder",
            Self::Cto => "Chief Technology Officer",
            Self::Bda => "Business Development Associate",
            Self::MarketingManager => "Marketing Manager",
            Self::FinanceManager => "Finance Manager",
            Self::HrManager => "HR Manager",
            Self::Admin => "Administrator",
            Self::ProjectManager => "Project Manager",
            Self::Developer => "Developer",
            Self::Client => "Client",
            Self::Candidate => "Candidate",
        }
    }

    /// CEO, FOUNDER, CTO
    pub fn is_executive(&self) -> bool {
        matches!(self, Self::Ceo | Self::Founder | Self::Cto)
    }

    /// BDA, MARKETING_MANAGER
    pub fn is_sales(&self) -> bool {
        matches!(self, Self::Bda | Self::MarketingManager)
    }

    /// FINANCE_MANAGER
    pub fn is_finance(&self) -> bool {
        matches!(self, Self::FinanceManager)
    }

    /// ADMIN, HR_MANAGER
    pub fn is_admin_group(&self) -> bool {
        matches!(self, Self::Admin | Self::HrManager)
    }

    /// Internal staff, i.e. neither a client nor an applicant
    pub fn is_staff(&self) -> bool {
        !matches!(self, Self::Client | Self::Candidate)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_groups() {
        assert!(Role::Ceo.is_executive());
        assert!(Role::Cto.is_executive());
        assert!(!Role::Admin.is_executive());
        assert!(Role::Bda.is_sales());
        assert!(Role::MarketingManager.is_sales());
        assert!(Role::HrManager.is_admin_group());
        assert!(Role::FinanceManager.is_finance());
        assert!(!Role::Client.is_staff());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("CEO".parse::<Role>(), Ok(Role::Ceo));
        assert_eq!("project-manager".parse::<Role>(), Ok(Role::ProjectManager));
        assert_eq!("hr manager".parse::<Role>(), Ok(Role::HrManager));
        assert!("intern".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_matches_tag() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }
}
