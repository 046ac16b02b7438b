use std::str::FromStr;

use serde::Deserialize;

use crate::graph::LevelPolicy;

/// Canonical node id type used throughout the crate.
///
/// Ids are opaque strings generated by the caller (the original data files
/// use time-based ids like `node1700000000000`).
pub type NodeId = String;

/// The four view categories a node can be rendered under.
///
/// - `TechTree`: the layered tree of everything not done.
/// - `DoneTree`: the layered tree of completed, non-hidden nodes.
/// - `Free`: dependency-free nodes currently actionable (schedule + job-mode
///   gated).
/// - `Waiting`: dependency-free nodes parked behind the `waiting` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    TechTree,
    DoneTree,
    Free,
    Waiting,
}

impl ViewKind {
    /// Which dependency-filtering policy governs level assignment for this
    /// view. The list views never compute levels but `None` keeps the
    /// mapping total.
    pub fn level_policy(self) -> LevelPolicy {
        match self {
            ViewKind::TechTree => LevelPolicy::IgnoreDoneDependencies,
            ViewKind::DoneTree => LevelPolicy::OnlyDoneDependencies,
            ViewKind::Free | ViewKind::Waiting => LevelPolicy::None,
        }
    }

    /// Whether this view is rendered as a layered tree (levels + positions)
    /// rather than a flat list.
    pub fn is_tree(self) -> bool {
        matches!(self, ViewKind::TechTree | ViewKind::DoneTree)
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tech-tree" | "techtree" => Ok(ViewKind::TechTree),
            "done-tree" | "donetree" | "done" => Ok(ViewKind::DoneTree),
            "free" | "free-node" => Ok(ViewKind::Free),
            "waiting" => Ok(ViewKind::Waiting),
            other => Err(format!(
                "invalid view: {other} (expected \"tech-tree\", \"done-tree\", \"free\" or \"waiting\")"
            )),
        }
    }
}
