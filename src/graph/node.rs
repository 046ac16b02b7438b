// src/graph/node.rs

use serde::{Deserialize, Serialize};

use crate::types::NodeId;

/// A single tech-tree node as persisted in the data file.
///
/// Field names follow the original JSON document (`techTreeData.json`), so
/// existing data files load unchanged. Layout positions are deliberately
/// *not* part of this model; they are recomputed per render (see
/// [`crate::layout`]).
///
/// The three state flags (`waiting`, `hidden`, `done`) are mutually
/// independent; `job` marks nodes that only show up in job mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,

    #[serde(default)]
    pub name: String,

    /// Opaque path reference to the node's image, stored verbatim
    /// (e.g. `/images/<name>.png`).
    #[serde(default, rename = "img")]
    pub image: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub waiting: bool,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub done: bool,

    #[serde(default)]
    pub job: bool,

    /// Ids of nodes this node depends on (they must complete first).
    ///
    /// Order is preserved; duplicates and self-references are rejected at
    /// the command layer, not here.
    #[serde(default)]
    pub dependencies: Vec<NodeId>,

    /// Weekdays (0 = Sunday .. 6 = Saturday) on which the node is visible in
    /// the free view. `None` or an empty set means "all days".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_days: Option<Vec<u8>>,

    /// Start of the daily visibility window, minutes since midnight (0-1439).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u16>,

    /// End of the daily visibility window, minutes since midnight (0-1439).
    /// May be below `start_time`, in which case the window wraps midnight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u16>,
}

impl Node {
    /// A fresh node with the given id and image reference and everything
    /// else at its defaults, matching what the original creates on
    /// drop/paste.
    pub fn new(id: impl Into<NodeId>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            image: image.into(),
            description: String::new(),
            waiting: false,
            hidden: false,
            done: false,
            job: false,
            dependencies: Vec::new(),
            visible_days: None,
            start_time: None,
            end_time: None,
        }
    }

    /// Whether this node lists `id` as a direct dependency.
    pub fn depends_on(&self, id: &str) -> bool {
        self.dependencies.iter().any(|d| d == id)
    }
}
