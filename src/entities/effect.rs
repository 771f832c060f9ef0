//! Effect entity type - impact or consequence of a failure mode

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;

/// Post-mitigation re-assessment of an effect
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResidualRisk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection: Option<u8>,
}

impl ResidualRisk {
    /// True when no post-mitigation scores have been recorded
    pub fn is_empty(&self) -> bool {
        self.severity.is_none() && self.occurrence.is_none() && self.detection.is_none()
    }
}

/// An effect of a failure mode, rated for severity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    /// Unique identifier
    pub id: EntityId,

    /// Owning failure mode
    pub failure_mode_id: EntityId,

    /// Consequence as experienced downstream
    pub description: String,

    /// Severity rating (FMEA: S)
    pub severity: u8,

    /// Post-mitigation re-assessment, if one has been done
    #[serde(default, skip_serializing_if = "ResidualRisk::is_empty")]
    pub residual: ResidualRisk,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Effect {
    const PREFIX: &'static str = "EFF";

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

impl Effect {
    /// Create a new effect attached to a failure mode
    pub fn new(failure_mode_id: EntityId, description: String, severity: u8) -> Self {
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Eff),
            failure_mode_id,
            description,
            severity,
            residual: ResidualRisk::default(),
            created: Utc::now(),
        }
    }
}
