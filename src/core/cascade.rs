//! Cascading deletes - referential integrity over the flat store
//!
//! The backing store has no foreign-key enforcement, so every delete walks
//! the ownership hierarchy itself: organization -> project -> component ->
//! failure mode -> {cause, effect, control, action}. All child-ID sets are
//! collected from the pre-deletion snapshot before anything is removed, so a
//! child is never missed because its parent's record was already dropped.
//!
//! Deletes are hard for business data. Invitations are the one exception:
//! deleting an organization cancels its pending invitations instead of
//! removing them, keeping the audit trail.
//!
//! Deleting a missing entity returns `StoreError::NotFound` and leaves the
//! store untouched. Persistence is the caller's single `Store::save` call;
//! a failure there surfaces as `StoreError::Io` with nothing partially
//! written.

use serde::Serialize;
use std::collections::HashSet;

use crate::core::identity::EntityId;
use crate::core::store::{Store, StoreError};
use crate::entities::InvitationStatus;

/// What a cascade removed, by entity type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub organizations: usize,
    pub projects: usize,
    pub components: usize,
    pub failure_modes: usize,
    pub causes: usize,
    pub effects: usize,
    pub controls: usize,
    pub actions: usize,
    /// Cancelled, not removed
    pub invitations_cancelled: usize,
}

impl CascadeReport {
    /// Total records removed (cancelled invitations not included)
    pub fn total_removed(&self) -> usize {
        self.organizations
            + self.projects
            + self.components
            + self.failure_modes
            + self.causes
            + self.effects
            + self.controls
            + self.actions
    }
}

fn not_found(kind: &'static str, id: &EntityId) -> StoreError {
    StoreError::NotFound {
        kind,
        id: id.to_string(),
    }
}

impl Store {
    /// Delete an organization and everything it transitively owns.
    /// Pending invitations are cancelled, not removed.
    pub fn delete_organization(&mut self, id: &EntityId) -> Result<CascadeReport, StoreError> {
        if self.organization(id).is_none() {
            return Err(not_found("organization", id));
        }

        // Snapshot the whole subtree before touching anything.
        let project_ids: HashSet<EntityId> = self
            .projects
            .iter()
            .filter(|p| &p.organization_id == id)
            .map(|p| p.id.clone())
            .collect();
        let mut report = self.remove_project_subtrees(&project_ids);

        for inv in self
            .invitations
            .iter_mut()
            .filter(|i| &i.organization_id == id && i.status == InvitationStatus::Pending)
        {
            inv.status = InvitationStatus::Cancelled;
            report.invitations_cancelled += 1;
        }

        self.organizations.retain(|o| &o.id != id);
        report.organizations = 1;
        Ok(report)
    }

    /// Delete a project and everything it transitively owns
    pub fn delete_project(&mut self, id: &EntityId) -> Result<CascadeReport, StoreError> {
        if self.project(id).is_none() {
            return Err(not_found("project", id));
        }

        let mut ids = HashSet::new();
        ids.insert(id.clone());
        Ok(self.remove_project_subtrees(&ids))
    }

    /// Delete a component, its failure modes, and their detail records
    pub fn delete_component(&mut self, id: &EntityId) -> Result<CascadeReport, StoreError> {
        if self.component(id).is_none() {
            return Err(not_found("component", id));
        }

        let fm_ids: HashSet<EntityId> = self
            .failure_modes
            .iter()
            .filter(|f| &f.component_id == id)
            .map(|f| f.id.clone())
            .collect();

        let mut report = self.remove_failure_mode_subtrees(&fm_ids);
        self.components.retain(|c| &c.id != id);
        report.components = 1;
        Ok(report)
    }

    /// Delete a failure mode and its causes, effects, controls, and actions
    pub fn delete_failure_mode(&mut self, id: &EntityId) -> Result<CascadeReport, StoreError> {
        if self.failure_mode(id).is_none() {
            return Err(not_found("failure mode", id));
        }

        let mut ids = HashSet::new();
        ids.insert(id.clone());
        Ok(self.remove_failure_mode_subtrees(&ids))
    }

    /// Delete a single cause
    pub fn delete_cause(&mut self, id: &EntityId) -> Result<CascadeReport, StoreError> {
        let before = self.causes.len();
        self.causes.retain(|c| &c.id != id);
        if self.causes.len() == before {
            return Err(not_found("cause", id));
        }
        Ok(CascadeReport {
            causes: 1,
            ..Default::default()
        })
    }

    /// Delete a single effect
    pub fn delete_effect(&mut self, id: &EntityId) -> Result<CascadeReport, StoreError> {
        let before = self.effects.len();
        self.effects.retain(|e| &e.id != id);
        if self.effects.len() == before {
            return Err(not_found("effect", id));
        }
        Ok(CascadeReport {
            effects: 1,
            ..Default::default()
        })
    }

    /// Delete a single control
    pub fn delete_control(&mut self, id: &EntityId) -> Result<CascadeReport, StoreError> {
        let before = self.controls.len();
        self.controls.retain(|c| &c.id != id);
        if self.controls.len() == before {
            return Err(not_found("control", id));
        }
        Ok(CascadeReport {
            controls: 1,
            ..Default::default()
        })
    }

    /// Delete a single action
    pub fn delete_action(&mut self, id: &EntityId) -> Result<CascadeReport, StoreError> {
        let before = self.actions.len();
        self.actions.retain(|a| &a.id != id);
        if self.actions.len() == before {
            return Err(not_found("action", id));
        }
        Ok(CascadeReport {
            actions: 1,
            ..Default::default()
        })
    }

    /// Remove the full subtrees of a set of projects (the projects included)
    fn remove_project_subtrees(&mut self, project_ids: &HashSet<EntityId>) -> CascadeReport {
        let component_ids: HashSet<EntityId> = self
            .components
            .iter()
            .filter(|c| project_ids.contains(&c.project_id))
            .map(|c| c.id.clone())
            .collect();

        // Failure modes are matched on project_id as well as component_id so
        // the walk cannot miss a record with an inconsistent pair.
        let fm_ids: HashSet<EntityId> = self
            .failure_modes
            .iter()
            .filter(|f| {
                project_ids.contains(&f.project_id) || component_ids.contains(&f.component_id)
            })
            .map(|f| f.id.clone())
            .collect();

        let mut report = self.remove_failure_mode_subtrees(&fm_ids);

        let before = self.components.len();
        self.components.retain(|c| !component_ids.contains(&c.id));
        report.components = before - self.components.len();

        let before = self.projects.len();
        self.projects.retain(|p| !project_ids.contains(&p.id));
        report.projects = before - self.projects.len();

        report
    }

    /// Remove the detail records of a set of failure modes, then the failure
    /// modes themselves. Dependents go first so the removal order reads
    /// bottom-up in logs; correctness only needs the pre-collected ID set.
    fn remove_failure_mode_subtrees(&mut self, fm_ids: &HashSet<EntityId>) -> CascadeReport {
        let mut report = CascadeReport::default();

        let before = self.causes.len();
        self.causes.retain(|c| !fm_ids.contains(&c.failure_mode_id));
        report.causes = before - self.causes.len();

        let before = self.effects.len();
        self.effects.retain(|e| !fm_ids.contains(&e.failure_mode_id));
        report.effects = before - self.effects.len();

        let before = self.controls.len();
        self.controls.retain(|c| !fm_ids.contains(&c.failure_mode_id));
        report.controls = before - self.controls.len();

        let before = self.actions.len();
        self.actions.retain(|a| !fm_ids.contains(&a.failure_mode_id));
        report.actions = before - self.actions.len();

        let before = self.failure_modes.len();
        self.failure_modes.retain(|f| !fm_ids.contains(&f.id));
        report.failure_modes = before - self.failure_modes.len();

        report
    }
}
