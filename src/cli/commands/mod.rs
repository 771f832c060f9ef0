//! CLI command implementations

pub mod action;
pub mod cause;
pub mod cmp;
pub mod completions;
pub mod ctrl;
pub mod effect;
pub mod fm;
pub mod init;
pub mod org;
pub mod project;
pub mod report;

use miette::Result;

use crate::core::identity::EntityId;
use crate::core::store::Store;
use crate::core::workspace::Workspace;

/// Discover the workspace and load its store
pub(crate) fn open_store() -> Result<(Workspace, Store)> {
    let ws = Workspace::discover().map_err(|e| miette::miette!("{}", e))?;
    let store = Store::load(&ws.store_path()).map_err(|e| miette::miette!("{}", e))?;
    Ok((ws, store))
}

/// Persist the store back to the workspace in one write
pub(crate) fn save_store(ws: &Workspace, store: &Store) -> Result<()> {
    store
        .save(&ws.store_path())
        .map_err(|e| miette::miette!("{}", e))
}

/// Resolve a user-supplied ID query (full ID or unique prefix) against a
/// set of candidate IDs.
pub(crate) fn resolve_id<'a>(
    candidates: impl Iterator<Item = &'a EntityId>,
    query: &str,
    kind: &str,
) -> Result<EntityId> {
    let query_upper = query.to_uppercase();
    let mut matches: Vec<&EntityId> = Vec::new();

    for id in candidates {
        let s = id.to_string();
        if s == query_upper {
            return Ok(id.clone());
        }
        if s.starts_with(&query_upper) {
            matches.push(id);
        }
    }

    match matches.len() {
        0 => Err(miette::miette!("No {} found matching '{}'", kind, query)),
        1 => Ok(matches[0].clone()),
        n => Err(miette::miette!(
            "Ambiguous {} query '{}' ({} matches). Please be more specific.",
            kind,
            query,
            n
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityPrefix;

    #[test]
    fn test_resolve_id_exact_and_prefix() {
        let a = EntityId::new(EntityPrefix::Fm);
        let b = EntityId::new(EntityPrefix::Fm);
        let ids = vec![a.clone(), b.clone()];

        let exact = resolve_id(ids.iter(), &a.to_string(), "failure mode").unwrap();
        assert_eq!(exact, a);

        // Full-length prefix resolves, short ambiguous prefix does not.
        let prefix = &b.to_string()[..20];
        let by_prefix = resolve_id(ids.iter(), prefix, "failure mode").unwrap();
        assert_eq!(by_prefix, b);

        assert!(resolve_id(ids.iter(), "FM-", "failure mode").is_err());
        assert!(resolve_id(ids.iter(), "CMP-NOPE", "failure mode").is_err());
    }
}
