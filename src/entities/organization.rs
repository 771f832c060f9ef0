//! Organization entity type - tenant root of the FMEA hierarchy

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;

/// Subscription plan, drives member and project limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Plan {
    #[default]
    Free,
    Pro,
    Enterprise,
}

impl Plan {
    /// Default member cap for the plan
    pub fn default_max_users(&self) -> u32 {
        match self {
            Plan::Free => 3,
            Plan::Pro => 25,
            Plan::Enterprise => 250,
        }
    }

    /// Default project cap for the plan
    pub fn default_max_projects(&self) -> u32 {
        match self {
            Plan::Free => 2,
            Plan::Pro => 20,
            Plan::Enterprise => 200,
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Plan::Free => write!(f, "free"),
            Plan::Pro => write!(f, "pro"),
            Plan::Enterprise => write!(f, "enterprise"),
        }
    }
}

impl std::str::FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "pro" => Ok(Plan::Pro),
            "enterprise" => Ok(Plan::Enterprise),
            _ => Err(format!("Unknown plan: {}. Use free, pro, or enterprise", s)),
        }
    }
}

/// An organization - owns projects and invitations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier
    pub id: EntityId,

    /// Organization name
    pub name: String,

    /// Subscription plan
    #[serde(default)]
    pub plan: Plan,

    /// Maximum number of members
    pub max_users: u32,

    /// Maximum number of projects
    pub max_projects: u32,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this organization)
    pub author: String,
}

impl Entity for Organization {
    const PREFIX: &'static str = "ORG";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl Organization {
    /// Create a new organization with plan-derived limits
    pub fn new(name: String, plan: Plan, author: String) -> Self {
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Org),
            name,
            plan,
            max_users: plan.default_max_users(),
            max_projects: plan.default_max_projects(),
            created: Utc::now(),
            author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_creation() {
        let org = Organization::new("Acme Reliability".to_string(), Plan::Pro, "test".to_string());

        assert!(org.id.to_string().starts_with("ORG-"));
        assert_eq!(org.name, "Acme Reliability");
        assert_eq!(org.plan, Plan::Pro);
        assert_eq!(org.max_users, 25);
        assert_eq!(org.max_projects, 20);
    }

    #[test]
    fn test_organization_roundtrip() {
        let org = Organization::new("Acme".to_string(), Plan::Free, "test".to_string());

        let json = serde_json::to_string(&org).unwrap();
        let parsed: Organization = serde_json::from_str(&json).unwrap();

        assert_eq!(org.id, parsed.id);
        assert_eq!(org.name, parsed.name);
        assert_eq!(org.plan, parsed.plan);
        assert_eq!(org.max_projects, parsed.max_projects);
    }

    #[test]
    fn test_plan_serializes_lowercase() {
        let org = Organization::new("Acme".to_string(), Plan::Enterprise, "test".to_string());
        let json = serde_json::to_string(&org).unwrap();
        assert!(json.contains("\"plan\":\"enterprise\""));
    }

    #[test]
    fn test_plan_from_str() {
        assert_eq!("pro".parse::<Plan>().unwrap(), Plan::Pro);
        assert_eq!("FREE".parse::<Plan>().unwrap(), Plan::Free);
        assert!("platinum".parse::<Plan>().is_err());
    }
}
