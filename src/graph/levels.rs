// src/graph/levels.rs

//! Topological level assignment under a dependency-filter policy.
//!
//! The level of a node is its depth in the (possibly filtered) dependency
//! graph: 0 with no effective dependencies, otherwise 1 + the maximum level
//! among them. The two tree views use different filters over the same raw
//! edges, so a cycle only counts as an error if it survives the filter.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::errors::{Result, TechdagError};
use crate::graph::node::Node;
use crate::graph::store::GraphStore;
use crate::types::NodeId;

/// Which dependency edges participate in level assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelPolicy {
    /// All edges.
    None,
    /// Drop edges whose target node is `done` (pending tech-tree view).
    IgnoreDoneDependencies,
    /// Keep only edges whose target node is `done` (completed-tree view).
    OnlyDoneDependencies,
}

impl Default for LevelPolicy {
    fn default() -> Self {
        LevelPolicy::None
    }
}

/// The effective dependency ids of `node` under `policy`.
///
/// Dependency ids that reference no node in the store are skipped with a
/// warning and contribute nothing.
pub fn effective_dependencies<'a>(
    store: &'a GraphStore,
    node: &'a Node,
    policy: LevelPolicy,
) -> Vec<&'a str> {
    node.dependencies
        .iter()
        .filter_map(|dep_id| match store.get(dep_id) {
            None => {
                warn!(node = %node.id, dep = %dep_id, "dependency references a missing node; skipping");
                None
            }
            Some(dep) => {
                let keep = match policy {
                    LevelPolicy::None => true,
                    LevelPolicy::IgnoreDoneDependencies => !dep.done,
                    LevelPolicy::OnlyDoneDependencies => dep.done,
                };
                keep.then_some(dep_id.as_str())
            }
        })
        .collect()
}

/// Assign a level to every node in the store under the given policy.
///
/// The level map is built once per call and memoizes across all walks.
/// A node revisited while its own level is still being computed means a
/// cycle in the *effective* graph, and the whole call fails with
/// [`TechdagError::CycleDetected`]; a raw cycle broken by the filter is
/// fine.
pub fn assign_levels(
    store: &GraphStore,
    policy: LevelPolicy,
) -> Result<HashMap<NodeId, u32>> {
    let mut levels: HashMap<NodeId, u32> = HashMap::new();

    for id in store.ids() {
        // One in-progress set per recursive walk.
        let mut visiting: HashSet<NodeId> = HashSet::new();
        compute_level(store, policy, id, &mut levels, &mut visiting)?;
    }

    Ok(levels)
}

fn compute_level(
    store: &GraphStore,
    policy: LevelPolicy,
    id: &str,
    levels: &mut HashMap<NodeId, u32>,
    visiting: &mut HashSet<NodeId>,
) -> Result<u32> {
    if let Some(&level) = levels.get(id) {
        return Ok(level);
    }

    if !visiting.insert(id.to_string()) {
        return Err(TechdagError::CycleDetected(id.to_string()));
    }

    let node = match store.get(id) {
        Some(n) => n,
        None => {
            // Only reachable via a dangling dependency id; the caller has
            // already warned, so just settle it at 0 without memoizing.
            visiting.remove(id);
            return Ok(0);
        }
    };

    let mut level = 0;
    for dep_id in effective_dependencies(store, node, policy) {
        let dep_level = compute_level(store, policy, dep_id, levels, visiting)?;
        level = level.max(dep_level + 1);
    }

    visiting.remove(id);
    levels.insert(id.to_string(), level);
    Ok(level)
}
