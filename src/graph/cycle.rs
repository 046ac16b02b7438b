// src/graph/cycle.rs

//! Cycle detection for dependency edits and whole-graph validation.
//!
//! Edge direction throughout is "must happen before": for a node `B` with
//! `dependencies = ["A"]` we reason about the edge `A -> B`.

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{Result, TechdagError};
use crate::graph::store::GraphStore;

/// Would adding "target depends on source" close a loop?
///
/// Builds the before-graph from the store, hypothetically adds the edge
/// `source -> target`, and returns true iff a path exists from `target`
/// back to `source`. A self-edge (`source == target`) is reported as a
/// cycle here too, even though callers reject it earlier.
pub fn would_create_cycle(store: &GraphStore, source_id: &str, target_id: &str) -> bool {
    if source_id == target_id {
        return true;
    }

    // Adjacency: id -> ids that must happen after it.
    let mut graph: HashMap<&str, Vec<&str>> = HashMap::new();
    for node in store.nodes() {
        graph.entry(node.id.as_str()).or_default();
        for dep in &node.dependencies {
            graph.entry(dep.as_str()).or_default().push(node.id.as_str());
        }
    }
    graph.entry(source_id).or_default().push(target_id);

    // Depth-first from target, looking for source.
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = vec![target_id];

    while let Some(current) = stack.pop() {
        if current == source_id {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        if let Some(next) = graph.get(current) {
            stack.extend(next.iter().copied());
        }
    }

    false
}

/// Validate that the full (unfiltered) dependency relation is acyclic.
///
/// Used when adopting a freshly loaded collection, before any per-view
/// level assignment runs. Dangling dependency ids are ignored here; the
/// level assigner warns about them per render.
pub fn validate_acyclic(store: &GraphStore) -> Result<()> {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for id in store.ids() {
        graph.add_node(id);
    }

    for node in store.nodes() {
        for dep in &node.dependencies {
            if store.contains(dep) {
                graph.add_edge(dep.as_str(), node.id.as_str(), ());
            }
        }
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(TechdagError::CycleDetected(
            cycle.node_id().to_string(),
        )),
    }
}
