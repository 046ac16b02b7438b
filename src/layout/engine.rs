// src/layout/engine.rs

//! Node positioning.
//!
//! Levels are stacked vertically. Within level 0, nodes sharing an
//! immediate dependent are grouped side by side so related roots stay
//! together; higher levels center each node over its dependencies and then
//! nudge it sideways until it no longer overlaps a neighbour.
//!
//! The whole computation is pure: it reads the store and writes a fresh
//! position map, so an aborted render never leaves half-updated positions
//! behind.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::warn;

use crate::graph::levels::{LevelPolicy, effective_dependencies};
use crate::graph::node::Node;
use crate::graph::store::GraphStore;
use crate::types::NodeId;

/// A computed node position, in container units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Layout tunables. Defaults match the original diagram geometry.
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    /// Minimum horizontal distance between sibling nodes.
    pub spacing: f64,
    /// Vertical distance between consecutive levels.
    pub level_gap: f64,
    /// How far the collision nudge may wander, in multiples of `spacing`,
    /// before giving up and leaving the overlap in place.
    pub collision_retries: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            spacing: 150.0,
            level_gap: 200.0,
            collision_retries: 10,
        }
    }
}

/// Compute positions for every node in `subset`.
///
/// `levels` must cover the subset (it comes from
/// [`crate::graph::assign_levels`] over the full store); a subset node
/// missing from it is skipped with a warning. `policy` must be the same
/// policy the level map was computed under, so that the mean-of-parents
/// step sees the same effective edges.
///
/// Output is keyed and ordered by node id; input subset order is the
/// tiebreak for slot and group ordering, so the same graph, subset and
/// level map always produce the same positions.
pub fn compute_positions(
    store: &GraphStore,
    levels: &HashMap<NodeId, u32>,
    subset: &[&Node],
    policy: LevelPolicy,
    opts: &LayoutOptions,
) -> BTreeMap<NodeId, Point> {
    let mut positions: BTreeMap<NodeId, Point> = BTreeMap::new();

    // Partition the subset by level, preserving subset order within each.
    let mut level_groups: BTreeMap<u32, Vec<&Node>> = BTreeMap::new();
    for &node in subset {
        match levels.get(&node.id) {
            Some(&level) => level_groups.entry(level).or_default().push(node),
            None => {
                warn!(node = %node.id, "node has no assigned level; skipping in layout");
            }
        }
    }

    let subset_ids: HashSet<&str> = subset.iter().map(|n| n.id.as_str()).collect();

    // Occupied horizontal positions per level, for collision checks.
    let mut occupied: HashMap<u32, Vec<f64>> = HashMap::new();

    for (&level, nodes_at_level) in &level_groups {
        let taken = occupied.entry(level).or_default();
        let y = f64::from(level) * opts.level_gap;

        if level == 0 {
            // Roots: lay out grouped by shared immediate dependents.
            let mut current_x = 0.0;
            for group in group_by_shared_dependents(nodes_at_level, store) {
                for node in group {
                    positions.insert(node.id.clone(), Point { x: current_x, y });
                    taken.push(current_x);
                    current_x += opts.spacing;
                }
            }
        } else {
            for &node in nodes_at_level {
                // Average over the effective dependencies that are part of
                // this view; they sit on lower levels, so they are placed.
                let dep_xs: Vec<f64> = effective_dependencies(store, node, policy)
                    .into_iter()
                    .filter(|dep| subset_ids.contains(dep))
                    .filter_map(|dep| positions.get(dep).map(|p| p.x))
                    .collect();

                let desired = if dep_xs.is_empty() {
                    // No parents in view: take the next open slot.
                    taken.len() as f64 * opts.spacing
                } else {
                    dep_xs.iter().sum::<f64>() / dep_xs.len() as f64
                };

                let x = resolve_collision(level, desired, taken, opts);
                positions.insert(node.id.clone(), Point { x, y });
                taken.push(x);
            }
        }
    }

    positions
}

/// Group level-0 nodes into connected components under the "shares at least
/// one immediate dependent" relation. Dependents come from the full store,
/// not just the rendered subset.
fn group_by_shared_dependents<'a>(
    nodes: &[&'a Node],
    store: &GraphStore,
) -> Vec<Vec<&'a Node>> {
    let dependents: Vec<Vec<&str>> = nodes
        .iter()
        .map(|node| {
            store
                .dependents_of(&node.id)
                .into_iter()
                .map(|d| d.id.as_str())
                .collect()
        })
        .collect();

    // Undirected adjacency between indices that share a dependent.
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let shared = dependents[i].iter().any(|d| dependents[j].contains(d));
            if shared {
                adjacency[i].push(j);
                adjacency[j].push(i);
            }
        }
    }

    // Connected components by depth-first traversal, in input order.
    let mut groups: Vec<Vec<&Node>> = Vec::new();
    let mut visited = vec![false; nodes.len()];

    for start in 0..nodes.len() {
        if visited[start] {
            continue;
        }
        let mut group = Vec::new();
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            group.push(nodes[idx]);
            for &next in &adjacency[idx] {
                if !visited[next] {
                    stack.push(next);
                }
            }
        }
        groups.push(group);
    }

    groups
}

/// Nudge `desired` alternately right then left in growing increments until
/// it clears every occupied position at this level, or the retry budget
/// runs out (overlap is then left in place).
fn resolve_collision(level: u32, desired: f64, taken: &[f64], opts: &LayoutOptions) -> f64 {
    let mut adjusted = desired;
    let mut offset = opts.spacing;
    let mut direction = 1.0;
    let max_offset = opts.spacing * f64::from(opts.collision_retries);

    while is_too_close(adjusted, taken, opts.spacing) {
        adjusted += direction * offset;
        direction = -direction;
        offset += opts.spacing / 2.0;

        if offset > max_offset {
            warn!(level, "no clear position found within retry budget; leaving overlap");
            break;
        }
    }

    adjusted
}

fn is_too_close(x: f64, taken: &[f64], spacing: f64) -> bool {
    taken.iter().any(|&existing| (existing - x).abs() < spacing)
}
