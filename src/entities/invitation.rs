//! Invitation entity type - pending organization membership
//!
//! Invitations are the one soft-delete exception in the store: they are
//! marked cancelled or accepted rather than removed, preserving an audit
//! trail of who was invited and when.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::EntityId;

/// Role granted on acceptance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Role {
    Admin,
    #[default]
    Editor,
    Viewer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Editor => write!(f, "editor"),
            Role::Viewer => write!(f, "viewer"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            _ => Err(format!("Unknown role: {}. Use admin, editor, or viewer", s)),
        }
    }
}

/// Invitation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum InvitationStatus {
    #[default]
    Pending,
    Accepted,
    Cancelled,
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvitationStatus::Pending => write!(f, "pending"),
            InvitationStatus::Accepted => write!(f, "accepted"),
            InvitationStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// An invitation to join an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    /// Unique identifier
    pub id: EntityId,

    /// Organization being joined
    pub organization_id: EntityId,

    /// Invitee email address
    pub email: String,

    /// Role granted on acceptance
    #[serde(default)]
    pub role: Role,

    /// Lifecycle status
    #[serde(default)]
    pub status: InvitationStatus,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Invitation {
    const PREFIX: &'static str = "INV";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.email
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl Invitation {
    /// Create a new pending invitation
    pub fn new(organization_id: EntityId, email: String, role: Role) -> Self {
        Self {
            id: EntityId::new(crate::core::EntityPrefix::Inv),
            organization_id,
            email,
            role,
            status: InvitationStatus::default(),
            created: Utc::now(),
        }
    }
}
