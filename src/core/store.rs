//! Whole-file JSON workspace store
//!
//! The entire FMEA hierarchy lives in one JSON document. Every command loads
//! the whole store, mutates the in-memory copy, and writes the whole store
//! back in a single call - that write is the atomicity boundary. There is no
//! locking between concurrent invocations; the later write wins.
//!
//! Mutations validate referential integrity (a child's parent must exist)
//! and score bounds against the owning project's scale. Reads never fail.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::identity::EntityId;
use crate::entities::{
    Action, ActionStatus, Cause, Component, Control, Effect, FailureMode, FailureModeStatus,
    Invitation, InvitationStatus, Organization, Project, ProjectSettings,
};
use crate::risk::{self, RiskSummary, ScoringScale};

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{score} score {value} is outside the project's {scale} scale")]
    ScoreOutOfRange {
        score: &'static str,
        value: u8,
        scale: ScoringScale,
    },

    #[error("organization '{org}' is at its plan limit of {limit} project(s)")]
    PlanLimit { org: String, limit: u32 },

    #[error("failure mode belongs to a different project than its component")]
    ProjectMismatch,

    #[error("failed to read or write store: {0}")]
    Io(#[from] std::io::Error),

    #[error("store file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

fn not_found(kind: &'static str, id: &EntityId) -> StoreError {
    StoreError::NotFound {
        kind,
        id: id.to_string(),
    }
}

/// The persisted state: flat collections per entity type, insertion-ordered
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Store {
    pub(crate) organizations: Vec<Organization>,
    pub(crate) projects: Vec<Project>,
    pub(crate) components: Vec<Component>,
    pub(crate) failure_modes: Vec<FailureMode>,
    pub(crate) causes: Vec<Cause>,
    pub(crate) effects: Vec<Effect>,
    pub(crate) controls: Vec<Control>,
    pub(crate) actions: Vec<Action>,
    pub(crate) invitations: Vec<Invitation>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from a JSON file
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the whole store in one call
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn failure_modes(&self) -> &[FailureMode] {
        &self.failure_modes
    }

    pub fn causes(&self) -> &[Cause] {
        &self.causes
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn invitations(&self) -> &[Invitation] {
        &self.invitations
    }

    pub fn organization(&self, id: &EntityId) -> Option<&Organization> {
        self.organizations.iter().find(|o| &o.id == id)
    }

    pub fn project(&self, id: &EntityId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn component(&self, id: &EntityId) -> Option<&Component> {
        self.components.iter().find(|c| &c.id == id)
    }

    pub fn failure_mode(&self, id: &EntityId) -> Option<&FailureMode> {
        self.failure_modes.iter().find(|f| &f.id == id)
    }

    pub fn invitation(&self, id: &EntityId) -> Option<&Invitation> {
        self.invitations.iter().find(|i| &i.id == id)
    }

    pub fn projects_of(&self, org_id: &EntityId) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| &p.organization_id == org_id)
            .collect()
    }

    /// Components of a project, in display order
    pub fn components_of(&self, project_id: &EntityId) -> Vec<&Component> {
        let mut cmps: Vec<&Component> = self
            .components
            .iter()
            .filter(|c| &c.project_id == project_id)
            .collect();
        cmps.sort_by_key(|c| c.order);
        cmps
    }

    pub fn failure_modes_of(&self, component_id: &EntityId) -> Vec<&FailureMode> {
        self.failure_modes
            .iter()
            .filter(|f| &f.component_id == component_id)
            .collect()
    }

    pub fn failure_modes_of_project(&self, project_id: &EntityId) -> Vec<&FailureMode> {
        self.failure_modes
            .iter()
            .filter(|f| &f.project_id == project_id)
            .collect()
    }

    pub fn causes_of(&self, fm_id: &EntityId) -> Vec<&Cause> {
        self.causes
            .iter()
            .filter(|c| &c.failure_mode_id == fm_id)
            .collect()
    }

    pub fn effects_of(&self, fm_id: &EntityId) -> Vec<&Effect> {
        self.effects
            .iter()
            .filter(|e| &e.failure_mode_id == fm_id)
            .collect()
    }

    pub fn controls_of(&self, fm_id: &EntityId) -> Vec<&Control> {
        self.controls
            .iter()
            .filter(|c| &c.failure_mode_id == fm_id)
            .collect()
    }

    pub fn actions_of(&self, fm_id: &EntityId) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|a| &a.failure_mode_id == fm_id)
            .collect()
    }

    pub fn invitations_of(&self, org_id: &EntityId) -> Vec<&Invitation> {
        self.invitations
            .iter()
            .filter(|i| &i.organization_id == org_id)
            .collect()
    }

    /// Compute the worst-case risk summary for a failure mode, using the
    /// owning project's scale. This is the detail-view aggregation.
    pub fn risk_summary(&self, fm_id: &EntityId) -> Result<RiskSummary, StoreError> {
        let fm = self
            .failure_mode(fm_id)
            .ok_or_else(|| not_found("failure mode", fm_id))?;
        let scale = self.scale_of(&fm.project_id);

        let causes: Vec<Cause> = self.causes_of(fm_id).into_iter().cloned().collect();
        let effects: Vec<Effect> = self.effects_of(fm_id).into_iter().cloned().collect();
        let controls: Vec<Control> = self.controls_of(fm_id).into_iter().cloned().collect();

        Ok(risk::worst_case(&causes, &effects, &controls, scale))
    }

    /// Scale of a project, defaulting when the project is unknown
    fn scale_of(&self, project_id: &EntityId) -> ScoringScale {
        self.project(project_id)
            .map(|p| p.settings.scale)
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Inserts (parent must exist, scores must fit the project scale)
    // ------------------------------------------------------------------

    pub fn insert_organization(&mut self, org: Organization) {
        self.organizations.push(org);
    }

    pub fn insert_project(&mut self, project: Project) -> Result<(), StoreError> {
        let org = self
            .organization(&project.organization_id)
            .ok_or_else(|| not_found("organization", &project.organization_id))?;

        let limit = org.max_projects;
        let existing = self.projects_of(&org.id).len() as u32;
        if existing >= limit {
            return Err(StoreError::PlanLimit {
                org: org.name.clone(),
                limit,
            });
        }

        self.projects.push(project);
        Ok(())
    }

    pub fn insert_component(&mut self, component: Component) -> Result<(), StoreError> {
        if self.project(&component.project_id).is_none() {
            return Err(not_found("project", &component.project_id));
        }
        self.components.push(component);
        Ok(())
    }

    pub fn insert_failure_mode(&mut self, fm: FailureMode) -> Result<(), StoreError> {
        let cmp = self
            .component(&fm.component_id)
            .ok_or_else(|| not_found("component", &fm.component_id))?;
        if cmp.project_id != fm.project_id {
            return Err(StoreError::ProjectMismatch);
        }
        self.failure_modes.push(fm);
        Ok(())
    }

    pub fn insert_cause(&mut self, cause: Cause) -> Result<(), StoreError> {
        let scale = self.scale_of_failure_mode(&cause.failure_mode_id)?;
        check_score(scale, "occurrence", cause.occurrence)?;
        self.causes.push(cause);
        Ok(())
    }

    pub fn insert_effect(&mut self, effect: Effect) -> Result<(), StoreError> {
        let scale = self.scale_of_failure_mode(&effect.failure_mode_id)?;
        check_score(scale, "severity", effect.severity)?;
        if let Some(s) = effect.residual.severity {
            check_score(scale, "residual severity", s)?;
        }
        if let Some(o) = effect.residual.occurrence {
            check_score(scale, "residual occurrence", o)?;
        }
        if let Some(d) = effect.residual.detection {
            check_score(scale, "residual detection", d)?;
        }
        self.effects.push(effect);
        Ok(())
    }

    pub fn insert_control(&mut self, control: Control) -> Result<(), StoreError> {
        let scale = self.scale_of_failure_mode(&control.failure_mode_id)?;
        check_score(scale, "detection", control.detection)?;
        check_score(scale, "effectiveness", control.effectiveness)?;
        self.controls.push(control);
        Ok(())
    }

    pub fn insert_action(&mut self, action: Action) -> Result<(), StoreError> {
        if self.failure_mode(&action.failure_mode_id).is_none() {
            return Err(not_found("failure mode", &action.failure_mode_id));
        }
        self.actions.push(action);
        Ok(())
    }

    pub fn insert_invitation(&mut self, invitation: Invitation) -> Result<(), StoreError> {
        if self.organization(&invitation.organization_id).is_none() {
            return Err(not_found("organization", &invitation.organization_id));
        }
        self.invitations.push(invitation);
        Ok(())
    }

    fn scale_of_failure_mode(&self, fm_id: &EntityId) -> Result<ScoringScale, StoreError> {
        let fm = self
            .failure_mode(fm_id)
            .ok_or_else(|| not_found("failure mode", fm_id))?;
        Ok(self.scale_of(&fm.project_id))
    }

    // ------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------

    pub fn rename_component(&mut self, id: &EntityId, name: String) -> Result<(), StoreError> {
        let cmp = self
            .components
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| not_found("component", id))?;
        cmp.name = name;
        Ok(())
    }

    pub fn reorder_component(&mut self, id: &EntityId, order: u32) -> Result<(), StoreError> {
        let cmp = self
            .components
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| not_found("component", id))?;
        cmp.order = order;
        Ok(())
    }

    pub fn set_failure_mode_status(
        &mut self,
        id: &EntityId,
        status: FailureModeStatus,
    ) -> Result<(), StoreError> {
        let fm = self
            .failure_modes
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| not_found("failure mode", id))?;
        fm.status = status;
        Ok(())
    }

    pub fn set_action_status(
        &mut self,
        id: &EntityId,
        status: ActionStatus,
    ) -> Result<(), StoreError> {
        let action = self
            .actions
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| not_found("action", id))?;
        action.status = status;
        Ok(())
    }

    pub fn set_project_settings(
        &mut self,
        id: &EntityId,
        settings: ProjectSettings,
    ) -> Result<(), StoreError> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| not_found("project", id))?;
        project.settings = settings;
        Ok(())
    }

    /// Mark an invitation accepted. Soft transition, the record stays.
    pub fn accept_invitation(&mut self, id: &EntityId) -> Result<(), StoreError> {
        self.set_invitation_status(id, InvitationStatus::Accepted)
    }

    /// Mark an invitation cancelled. Soft transition, the record stays.
    pub fn cancel_invitation(&mut self, id: &EntityId) -> Result<(), StoreError> {
        self.set_invitation_status(id, InvitationStatus::Cancelled)
    }

    fn set_invitation_status(
        &mut self,
        id: &EntityId,
        status: InvitationStatus,
    ) -> Result<(), StoreError> {
        let inv = self
            .invitations
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| not_found("invitation", id))?;
        inv.status = status;
        Ok(())
    }

    // Cascade deletes live in core::cascade.
}

/// Validate a rating against the scale's bounds
fn check_score(scale: ScoringScale, score: &'static str, value: u8) -> Result<(), StoreError> {
    if scale.contains(value) {
        Ok(())
    } else {
        Err(StoreError::ScoreOutOfRange {
            score,
            value,
            scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ControlType, Plan};
    use tempfile::tempdir;

    fn org(store: &mut Store) -> EntityId {
        let o = Organization::new("Acme".to_string(), Plan::Pro, "t".to_string());
        let id = o.id.clone();
        store.insert_organization(o);
        id
    }

    fn project(store: &mut Store, org_id: &EntityId) -> EntityId {
        let p = Project::new(org_id.clone(), "Study".to_string(), None, "t".to_string());
        let id = p.id.clone();
        store.insert_project(p).unwrap();
        id
    }

    fn component(store: &mut Store, project_id: &EntityId) -> EntityId {
        let c = Component::new(project_id.clone(), "Seal".to_string(), 0, "t".to_string());
        let id = c.id.clone();
        store.insert_component(c).unwrap();
        id
    }

    fn failure_mode(store: &mut Store, project_id: &EntityId, cmp_id: &EntityId) -> EntityId {
        let f = FailureMode::new(
            project_id.clone(),
            cmp_id.clone(),
            "Leak".to_string(),
            None,
            "t".to_string(),
        );
        let id = f.id.clone();
        store.insert_failure_mode(f).unwrap();
        id
    }

    #[test]
    fn test_insert_project_requires_organization() {
        let mut store = Store::new();
        let orphan = Project::new(
            EntityId::new(crate::core::EntityPrefix::Org),
            "Orphan".to_string(),
            None,
            "t".to_string(),
        );
        let err = store.insert_project(orphan).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "organization", .. }));
    }

    #[test]
    fn test_insert_project_enforces_plan_limit() {
        let mut store = Store::new();
        let o = Organization::new("Tiny".to_string(), Plan::Free, "t".to_string());
        let org_id = o.id.clone();
        store.insert_organization(o);

        // Free plan allows 2 projects
        project(&mut store, &org_id);
        project(&mut store, &org_id);

        let third = Project::new(org_id.clone(), "Third".to_string(), None, "t".to_string());
        let err = store.insert_project(third).unwrap_err();
        assert!(matches!(err, StoreError::PlanLimit { limit: 2, .. }));
    }

    #[test]
    fn test_insert_failure_mode_rejects_project_mismatch() {
        let mut store = Store::new();
        let org_id = org(&mut store);
        let proj_a = project(&mut store, &org_id);
        let proj_b = project(&mut store, &org_id);
        let cmp_in_a = component(&mut store, &proj_a);

        let fm = FailureMode::new(
            proj_b,
            cmp_in_a,
            "Wrong project".to_string(),
            None,
            "t".to_string(),
        );
        assert!(matches!(
            store.insert_failure_mode(fm).unwrap_err(),
            StoreError::ProjectMismatch
        ));
    }

    #[test]
    fn test_insert_cause_validates_scale() {
        let mut store = Store::new();
        let org_id = org(&mut store);
        let proj_id = project(&mut store, &org_id);
        let cmp_id = component(&mut store, &proj_id);
        let fm_id = failure_mode(&mut store, &proj_id, &cmp_id);

        let bad = Cause::new(fm_id.clone(), "Too big".to_string(), 11);
        assert!(matches!(
            store.insert_cause(bad).unwrap_err(),
            StoreError::ScoreOutOfRange { score: "occurrence", value: 11, .. }
        ));

        let ok = Cause::new(fm_id, "Fine".to_string(), 10);
        store.insert_cause(ok).unwrap();
    }

    #[test]
    fn test_five_point_scale_tightens_bounds() {
        let mut store = Store::new();
        let org_id = org(&mut store);
        let proj_id = project(&mut store, &org_id);
        store
            .set_project_settings(&proj_id, ProjectSettings::for_scale(ScoringScale::OneToFive))
            .unwrap();
        let cmp_id = component(&mut store, &proj_id);
        let fm_id = failure_mode(&mut store, &proj_id, &cmp_id);

        let bad = Effect::new(fm_id, "Severity 7 on 1-5".to_string(), 7);
        assert!(store.insert_effect(bad).is_err());
    }

    #[test]
    fn test_risk_summary_uses_project_scale() {
        let mut store = Store::new();
        let org_id = org(&mut store);
        let proj_id = project(&mut store, &org_id);
        store
            .set_project_settings(&proj_id, ProjectSettings::for_scale(ScoringScale::OneToFive))
            .unwrap();
        let cmp_id = component(&mut store, &proj_id);
        let fm_id = failure_mode(&mut store, &proj_id, &cmp_id);

        store
            .insert_cause(Cause::new(fm_id.clone(), "c".to_string(), 3))
            .unwrap();
        store
            .insert_effect(Effect::new(fm_id.clone(), "e".to_string(), 4))
            .unwrap();

        // No controls: worst detection on the 1-5 scale is 5
        let summary = store.risk_summary(&fm_id).unwrap();
        assert_eq!(summary.max_detection, 5);
        assert_eq!(summary.max_rpn, 60);
    }

    #[test]
    fn test_risk_summary_worst_case_pairing() {
        let mut store = Store::new();
        let org_id = org(&mut store);
        let proj_id = project(&mut store, &org_id);
        let cmp_id = component(&mut store, &proj_id);
        let fm_id = failure_mode(&mut store, &proj_id, &cmp_id);

        for occ in [5, 8] {
            store
                .insert_cause(Cause::new(fm_id.clone(), format!("occ {}", occ), occ))
                .unwrap();
        }
        for sev in [7, 3] {
            store
                .insert_effect(Effect::new(fm_id.clone(), format!("sev {}", sev), sev))
                .unwrap();
        }
        for det in [4, 9] {
            store
                .insert_control(Control::new(
                    fm_id.clone(),
                    format!("det {}", det),
                    ControlType::Detection,
                    det,
                    5,
                ))
                .unwrap();
        }

        let summary = store.risk_summary(&fm_id).unwrap();
        assert_eq!(summary.max_rpn, 224);
        assert_eq!(summary.max_severity, 7);
        assert_eq!(summary.max_occurrence, 8);
        assert_eq!(summary.max_detection, 4);
    }

    #[test]
    fn test_store_roundtrip_through_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("store.json");

        let mut store = Store::new();
        let org_id = org(&mut store);
        let proj_id = project(&mut store, &org_id);
        component(&mut store, &proj_id);
        store.save(&path).unwrap();

        let loaded = Store::load(&path).unwrap();
        assert_eq!(loaded.organizations().len(), 1);
        assert_eq!(loaded.projects().len(), 1);
        assert_eq!(loaded.components().len(), 1);
        assert!(loaded.project(&proj_id).is_some());
    }

    #[test]
    fn test_load_empty_document() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("store.json");
        std::fs::write(&path, "{}").unwrap();

        let store = Store::load(&path).unwrap();
        assert!(store.organizations().is_empty());
    }

    #[test]
    fn test_load_corrupt_document() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            Store::load(&path).unwrap_err(),
            StoreError::Corrupt(_)
        ));
    }

    #[test]
    fn test_invitation_soft_transitions() {
        let mut store = Store::new();
        let org_id = org(&mut store);
        let inv = Invitation::new(org_id.clone(), "a@b.com".to_string(), Default::default());
        let inv_id = inv.id.clone();
        store.insert_invitation(inv).unwrap();

        store.accept_invitation(&inv_id).unwrap();
        assert_eq!(
            store.invitation(&inv_id).unwrap().status,
            InvitationStatus::Accepted
        );
        assert_eq!(store.invitations_of(&org_id).len(), 1);
    }
}
