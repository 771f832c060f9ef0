//! Workspace discovery and structure
//!
//! A workspace is a directory with a `.fmx/` dir holding the JSON store and
//! the workspace config.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::store::Store;

/// Store file location within the `.fmx/` dir
const STORE_FILE: &str = "store.json";

/// Represents an FMX workspace
#[derive(Debug)]
pub struct Workspace {
    /// Root directory of the workspace (parent of .fmx/)
    root: PathBuf,
}

impl Workspace {
    /// Find the workspace root by walking up from the current directory
    pub fn discover() -> Result<Self, WorkspaceError> {
        let current =
            std::env::current_dir().map_err(|e| WorkspaceError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find the workspace root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, WorkspaceError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        loop {
            let fmx_dir = current.join(".fmx");
            if fmx_dir.is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(WorkspaceError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new workspace at the given path with an empty store
    pub fn init(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let fmx_dir = root.join(".fmx");
        if fmx_dir.exists() {
            return Err(WorkspaceError::AlreadyExists(root.clone()));
        }

        Self::write_skeleton(&root)?;
        Ok(Self { root })
    }

    /// Force initialization even if .fmx/ exists, resetting the store
    pub fn init_force(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::write_skeleton(&root)?;
        Ok(Self { root })
    }

    fn write_skeleton(root: &Path) -> Result<(), WorkspaceError> {
        let fmx_dir = root.join(".fmx");
        std::fs::create_dir_all(&fmx_dir).map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        let store = Store::new();
        store
            .save(&fmx_dir.join(STORE_FILE))
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        std::fs::write(fmx_dir.join("config.yaml"), Self::default_config())
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        Ok(())
    }

    fn default_config() -> &'static str {
        r#"# FMX Workspace Configuration

# Default author for new entities (can be overridden by global config)
# author: ""

# Default output format (auto, json, tsv, csv, md, id)
# default_format: auto

# Default organization ID used when --org is omitted
# default_org: ""
"#
    }

    /// Get the workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .fmx configuration directory
    pub fn fmx_dir(&self) -> PathBuf {
        self.root.join(".fmx")
    }

    /// Get the store file path
    pub fn store_path(&self) -> PathBuf {
        self.fmx_dir().join(STORE_FILE)
    }
}

/// Errors that can occur during workspace operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("not an FMX workspace (searched from {searched_from:?}). Run 'fmx init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("FMX workspace already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_workspace_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();

        assert!(ws.fmx_dir().exists());
        assert!(ws.store_path().exists());
        assert!(ws.fmx_dir().join("config.yaml").exists());

        // Fresh store is empty but loadable
        let store = Store::load(&ws.store_path()).unwrap();
        assert!(store.organizations().is_empty());
    }

    #[test]
    fn test_workspace_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Workspace::init(tmp.path()).unwrap();

        let err = Workspace::init(tmp.path()).unwrap_err();
        assert!(matches!(err, WorkspaceError::AlreadyExists(_)));
    }

    #[test]
    fn test_workspace_discover_finds_fmx_dir() {
        let tmp = tempdir().unwrap();
        Workspace::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let ws = Workspace::discover_from(&subdir).unwrap();
        assert_eq!(
            ws.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_workspace_discover_fails_without_fmx_dir() {
        let tmp = tempdir().unwrap();
        let err = Workspace::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, WorkspaceError::NotFound { .. }));
    }
}
