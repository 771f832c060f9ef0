//! Action entity type - recommended action on a failure mode

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;

/// Action implementation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum ActionStatus {
    #[default]
    Open,
    InProgress,
    Completed,
    Verified,
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionStatus::Open => write!(f, "open"),
            ActionStatus::InProgress => write!(f, "in_progress"),
            ActionStatus::Completed => write!(f, "completed"),
            ActionStatus::Verified => write!(f, "verified"),
        }
    }
}

impl std::str::FromStr for ActionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(ActionStatus::Open),
            "in_progress" | "in-progress" => Ok(ActionStatus::InProgress),
            "completed" => Ok(ActionStatus::Completed),
            "verified" => Ok(ActionStatus::Verified),
            _ => Err(format!("Unknown action status: {}", s)),
        }
    }
}

/// A recommended action attached to a failure mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier
    pub id: EntityId,

    /// Owning failure mode
    pub failure_mode_id: EntityId,

    /// What needs to be done
    pub title: String,

    /// Person responsible
    pub owner: String,

    /// Target completion date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Implementation status
    #[serde(default)]
    pub status: ActionStatus,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Action {
    const PREFIX: &'static str = "ACT";

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

impl Action {
    /// Create a new open action attached to a failure mode
    pub fn new(
        failure_mode_id: EntityId,
        title: String,
        owner: String,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Act),
            failure_mode_id,
            title,
            owner,
            due_date,
            status: ActionStatus::default(),
            created: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityPrefix;

    #[test]
    fn test_action_creation() {
        let fm = EntityId::new(EntityPrefix::Fm);
        let action = Action::new(
            fm.clone(),
            "Add thermal cutoff".to_string(),
            "jane".to_string(),
            None,
        );

        assert!(action.id.to_string().starts_with("ACT-"));
        assert_eq!(action.failure_mode_id, fm);
        assert_eq!(action.status, ActionStatus::Open);
        assert_eq!(action.owner, "jane");
    }

    #[test]
    fn test_action_roundtrip_with_due_date() {
        let due = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let action = Action::new(
            EntityId::new(EntityPrefix::Fm),
            "Revise seal spec".to_string(),
            "lee".to_string(),
            Some(due),
        );

        let json = serde_json::to_string(&action).unwrap();
        let parsed: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.due_date, Some(due));
        assert_eq!(parsed.title, "Revise seal spec");
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let mut action = Action::new(
            EntityId::new(EntityPrefix::Fm),
            "Qualify supplier".to_string(),
            "sam".to_string(),
            None,
        );
        action.status = ActionStatus::InProgress;

        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"status\":\"in_progress\""));
    }
}
