//! Failure mode entity type - how a component can fail

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;

/// Analysis status of a failure mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum FailureModeStatus {
    #[default]
    Identified,
    Analyzed,
    Mitigated,
    Closed,
}

impl std::fmt::Display for FailureModeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureModeStatus::Identified => write!(f, "identified"),
            FailureModeStatus::Analyzed => write!(f, "analyzed"),
            FailureModeStatus::Mitigated => write!(f, "mitigated"),
            FailureModeStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for FailureModeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "identified" => Ok(FailureModeStatus::Identified),
            "analyzed" => Ok(FailureModeStatus::Analyzed),
            "mitigated" => Ok(FailureModeStatus::Mitigated),
            "closed" => Ok(FailureModeStatus::Closed),
            _ => Err(format!("Unknown failure mode status: {}", s)),
        }
    }
}

/// A failure mode on a component.
///
/// Carries both its component and project so project-level queries need no
/// join through the component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureMode {
    /// Unique identifier
    pub id: EntityId,

    /// Owning project
    pub project_id: EntityId,

    /// Owning component
    pub component_id: EntityId,

    /// How the failure manifests
    pub title: String,

    /// Detailed description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Analysis status
    #[serde(default)]
    pub status: FailureModeStatus,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this failure mode)
    pub author: String,
}

impl Entity for FailureMode {
    const PREFIX: &'static str = "FM";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl FailureMode {
    /// Create a new failure mode on a component
    pub fn new(
        project_id: EntityId,
        component_id: EntityId,
        title: String,
        description: Option<String>,
        author: String,
    ) -> Self {
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Fm),
            project_id,
            component_id,
            title,
            description,
            status: FailureModeStatus::default(),
            created: Utc::now(),
            author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityPrefix;

    #[test]
    fn test_failure_mode_creation() {
        let proj = EntityId::new(EntityPrefix::Proj);
        let cmp = EntityId::new(EntityPrefix::Cmp);
        let fm = FailureMode::new(
            proj.clone(),
            cmp.clone(),
            "Seal extrusion under pressure".to_string(),
            None,
            "test".to_string(),
        );

        assert!(fm.id.to_string().starts_with("FM-"));
        assert_eq!(fm.project_id, proj);
        assert_eq!(fm.component_id, cmp);
        assert_eq!(fm.status, FailureModeStatus::Identified);
    }

    #[test]
    fn test_failure_mode_roundtrip() {
        let mut fm = FailureMode::new(
            EntityId::new(EntityPrefix::Proj),
            EntityId::new(EntityPrefix::Cmp),
            "Cracked housing".to_string(),
            Some("Radial crack at mounting boss".to_string()),
            "test".to_string(),
        );
        fm.status = FailureModeStatus::Mitigated;

        let json = serde_json::to_string(&fm).unwrap();
        let parsed: FailureMode = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.status, FailureModeStatus::Mitigated);
        assert_eq!(parsed.description.as_deref(), Some("Radial crack at mounting boss"));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let fm = FailureMode::new(
            EntityId::new(EntityPrefix::Proj),
            EntityId::new(EntityPrefix::Cmp),
            "Test".to_string(),
            None,
            "test".to_string(),
        );
        let json = serde_json::to_string(&fm).unwrap();
        assert!(json.contains("\"status\":\"identified\""));
    }
}
