//! Entity type definitions
//!
//! The FMEA hierarchy, each entity owned by its parent:
//!
//! - [`Organization`] - tenant root, owns projects and invitations
//! - [`Project`] - one FMEA study of one asset, carries scoring settings
//! - [`Component`] - analyzed item within a project
//! - [`FailureMode`] - how a component can fail
//! - [`Cause`] / [`Effect`] / [`Control`] / [`Action`] - failure mode detail
//! - [`Invitation`] - pending organization membership (soft-deleted only)

pub mod action;
pub mod cause;
pub mod component;
pub mod control;
pub mod effect;
pub mod failure_mode;
pub mod invitation;
pub mod organization;
pub mod project;

pub use action::{Action, ActionStatus};
pub use cause::Cause;
pub use component::Component;
pub use control::{Control, ControlType};
pub use effect::{Effect, ResidualRisk};
pub use failure_mode::{FailureMode, FailureModeStatus};
pub use invitation::{Invitation, InvitationStatus, Role};
pub use organization::{Organization, Plan};
pub use project::{Project, ProjectSettings};
