//! Core module - identity, storage, and workspace plumbing

pub mod cascade;
pub mod config;
pub mod entity;
pub mod identity;
pub mod store;
pub mod workspace;

pub use cascade::CascadeReport;
pub use config::Config;
pub use entity::Entity;
pub use identity::{EntityId, EntityPrefix, IdParseError};
pub use store::{Store, StoreError};
pub use workspace::{Workspace, WorkspaceError};
