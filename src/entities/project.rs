//! Project entity type - one FMEA study within an organization

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;
use crate::risk::{default_bands, RiskBand, ScoringScale};

/// Per-project scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Rating scale for severity/occurrence/detection
    #[serde(default)]
    pub scale: ScoringScale,

    /// Ordered threshold bands for RPN classification
    #[serde(default = "default_ten_point_bands")]
    pub bands: Vec<RiskBand>,
}

fn default_ten_point_bands() -> Vec<RiskBand> {
    default_bands(ScoringScale::OneToTen)
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self::for_scale(ScoringScale::default())
    }
}

impl ProjectSettings {
    /// Settings with the platform default bands for the given scale
    pub fn for_scale(scale: ScoringScale) -> Self {
        Self {
            scale,
            bands: default_bands(scale),
        }
    }
}

/// A project - one FMEA study of one asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: EntityId,

    /// Owning organization
    pub organization_id: EntityId,

    /// Project name
    pub name: String,

    /// Asset under analysis (free-text reference, e.g. "Brake caliper rev C")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,

    /// Scoring settings
    #[serde(default)]
    pub settings: ProjectSettings,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this project)
    pub author: String,
}

impl Entity for Project {
    const PREFIX: &'static str = "PROJ";

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

impl Project {
    /// Create a new project under an organization, with default settings
    pub fn new(
        organization_id: EntityId,
        name: String,
        asset: Option<String>,
        author: String,
    ) -> Self {
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Proj),
            organization_id,
            name,
            asset,
            settings: ProjectSettings::default(),
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
    fn test_project_creation() {
        let org = EntityId::new(EntityPrefix::Org);
        let project = Project::new(
            org.clone(),
            "Caliper FMEA".to_string(),
            Some("Brake caliper rev C".to_string()),
            "test".to_string(),
        );

        assert!(project.id.to_string().starts_with("PROJ-"));
        assert_eq!(project.organization_id, org);
        assert_eq!(project.settings.scale, ScoringScale::OneToTen);
        assert_eq!(project.settings.bands.len(), 4);
    }

    #[test]
    fn test_project_roundtrip() {
        let mut project = Project::new(
            EntityId::new(EntityPrefix::Org),
            "Pump FMEA".to_string(),
            None,
            "test".to_string(),
        );
        project.settings = ProjectSettings::for_scale(ScoringScale::OneToFive);

        let json = serde_json::to_string(&project).unwrap();
        let parsed: Project = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.settings.scale, ScoringScale::OneToFive);
        assert_eq!(parsed.settings.bands[3].max, 125);
        assert!(parsed.asset.is_none());
    }

    #[test]
    fn test_settings_default_when_missing() {
        // Older store documents may lack the settings field entirely.
        let json = format!(
            r#"{{"id":"{}","organization_id":"{}","name":"Legacy","created":"2026-01-01T00:00:00Z","author":"t"}}"#,
            EntityId::new(EntityPrefix::Proj),
            EntityId::new(EntityPrefix::Org),
        );
        let parsed: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.settings.scale, ScoringScale::OneToTen);
        assert_eq!(parsed.settings.bands.len(), 4);
    }
}
