//! FMX: FMEA workspace toolkit
//!
//! Manage FMEA studies (organizations, projects, components, failure modes
//! and their causes/effects/controls/actions) in a single JSON store, with
//! worst-case RPN scoring and cascade-safe deletes.

pub mod cli;
pub mod core;
pub mod entities;
pub mod risk;
