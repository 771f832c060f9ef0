//! Control entity type - prevention or detection measure on a failure mode

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;

/// Control type - how the control acts on the failure mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ControlType {
    /// Reduces the likelihood of the cause
    #[default]
    Prevention,
    /// Catches the failure before it reaches the customer
    Detection,
}

impl std::fmt::Display for ControlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlType::Prevention => write!(f, "prevention"),
            ControlType::Detection => write!(f, "detection"),
        }
    }
}

impl std::str::FromStr for ControlType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prevention" => Ok(ControlType::Prevention),
            "detection" => Ok(ControlType::Detection),
            _ => Err(format!(
                "Unknown control type: {}. Use prevention or detection",
                s
            )),
        }
    }
}

/// A control attached to a failure mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Control {
    /// Unique identifier
    pub id: EntityId,

    /// Owning failure mode
    pub failure_mode_id: EntityId,

    /// What the control is
    pub description: String,

    /// Prevention or detection
    #[serde(rename = "type")]
    pub control_type: ControlType,

    /// Detection rating (FMEA: D) - 1 certain detection, max cannot detect
    pub detection: u8,

    /// Effectiveness rating - how well the control works in practice
    pub effectiveness: u8,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Control {
    const PREFIX: &'static str = "CTRL";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.description
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl Control {
    /// Create a new control attached to a failure mode
    pub fn new(
        failure_mode_id: EntityId,
        description: String,
        control_type: ControlType,
        detection: u8,
        effectiveness: u8,
    ) -> Self {
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Ctrl),
            failure_mode_id,
            description,
            control_type,
            detection,
            effectiveness,
            created: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityPrefix;

    #[test]
    fn test_control_creation() {
        let fm = EntityId::new(EntityPrefix::Fm);
        let ctrl = Control::new(
            fm.clone(),
            "End-of-line pressure test".to_string(),
            ControlType::Detection,
            3,
            8,
        );

        assert!(ctrl.id.to_string().starts_with("CTRL-"));
        assert_eq!(ctrl.failure_mode_id, fm);
        assert_eq!(ctrl.control_type, ControlType::Detection);
        assert_eq!(ctrl.detection, 3);
        assert_eq!(ctrl.effectiveness, 8);
    }

    #[test]
    fn test_control_serializes_type_correctly() {
        let ctrl = Control::new(
            EntityId::new(EntityPrefix::Fm),
            "Material cert review".to_string(),
            ControlType::Prevention,
            5,
            6,
        );

        let json = serde_json::to_string(&ctrl).unwrap();
        assert!(json.contains("\"type\":\"prevention\""));
    }

    #[test]
    fn test_control_roundtrip() {
        let ctrl = Control::new(
            EntityId::new(EntityPrefix::Fm),
            "SPC on bore diameter".to_string(),
            ControlType::Detection,
            4,
            7,
        );

        let json = serde_json::to_string(&ctrl).unwrap();
        let parsed: Control = serde_json::from_str(&json).unwrap();

        assert_eq!(ctrl.id, parsed.id);
        assert_eq!(parsed.control_type, ControlType::Detection);
        assert_eq!(parsed.detection, 4);
    }
}
