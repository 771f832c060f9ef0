//! Component entity type - analyzed item within a project

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;

/// A component of the analyzed asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// Unique identifier
    pub id: EntityId,

    /// Owning project
    pub project_id: EntityId,

    /// Component name
    pub name: String,

    /// Display order within the project
    #[serde(default)]
    pub order: u32,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this component)
    pub author: String,
}

impl Entity for Component {
    const PREFIX: &'static str = "CMP";

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

impl Component {
    /// Create a new component within a project
    pub fn new(project_id: EntityId, name: String, order: u32, author: String) -> Self {
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Cmp),
            project_id,
            name,
            order,
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
    fn test_component_creation() {
        let proj = EntityId::new(EntityPrefix::Proj);
        let cmp = Component::new(proj.clone(), "Piston seal".to_string(), 1, "test".to_string());

        assert!(cmp.id.to_string().starts_with("CMP-"));
        assert_eq!(cmp.project_id, proj);
        assert_eq!(cmp.order, 1);
    }

    #[test]
    fn test_component_roundtrip() {
        let cmp = Component::new(
            EntityId::new(EntityPrefix::Proj),
            "Housing".to_string(),
            3,
            "test".to_string(),
        );

        let json = serde_json::to_string(&cmp).unwrap();
        let parsed: Component = serde_json::from_str(&json).unwrap();

        assert_eq!(cmp.id, parsed.id);
        assert_eq!(parsed.name, "Housing");
        assert_eq!(parsed.order, 3);
    }
}
