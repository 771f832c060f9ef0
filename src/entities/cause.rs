//! Cause entity type - root cause or mechanism of a failure mode

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;

/// A cause of a failure mode, rated for occurrence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cause {
    /// Unique identifier
    pub id: EntityId,

    /// Owning failure mode
    pub failure_mode_id: EntityId,

    /// How the failure comes about
    pub description: String,

    /// Occurrence/probability rating (FMEA: O)
    pub occurrence: u8,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Cause {
    const PREFIX: &'static str = "CAUSE";

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

impl Cause {
    /// Create a new cause attached to a failure mode
    pub fn new(failure_mode_id: EntityId, description: String, occurrence: u8) -> Self {
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Cause),
            failure_mode_id,
            description,
            occurrence,
            created: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityPrefix;

    #[test]
    fn test_cause_creation() {
        let fm = EntityId::new(EntityPrefix::Fm);
        let cause = Cause::new(fm.clone(), "Seal degradation".to_string(), 6);

        assert!(cause.id.to_string().starts_with("CAUSE-"));
        assert_eq!(cause.failure_mode_id, fm);
        assert_eq!(cause.occurrence, 6);
    }

    #[test]
    fn test_cause_roundtrip() {
        let cause = Cause::new(
            EntityId::new(EntityPrefix::Fm),
            "Vibration fatigue".to_string(),
            4,
        );

        let json = serde_json::to_string(&cause).unwrap();
        let parsed: Cause = serde_json::from_str(&json).unwrap();

        assert_eq!(cause.id, parsed.id);
        assert_eq!(cause.description, parsed.description);
        assert_eq!(cause.occurrence, parsed.occurrence);
    }
}
