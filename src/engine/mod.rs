// src/engine/mod.rs

//! Command dispatch for graph edits.
//!
//! User actions (drop, drag-to-link, side-panel save, delete) arrive as an
//! explicit [`Command`] set, keeping the core free of any UI coupling.
//!
//! The pure validation-and-mutation logic lives in [`core`]; the async
//! shell that persists after every applied command is [`session`].

pub mod core;
pub mod session;

pub use core::GraphEngine;
pub use session::{RenderedView, Session};

use crate::graph::Node;
use crate::types::NodeId;

/// A discrete user command against the graph.
#[derive(Debug, Clone)]
pub enum Command {
    /// Insert a new node (fails on a duplicate id).
    AddNode(Node),
    /// Delete a node; its id is stripped from every dependency list.
    DeleteNode { id: NodeId },
    /// Make `target_id` depend on `source_id` (source must complete first).
    AddDependency {
        source_id: NodeId,
        target_id: NodeId,
    },
    /// Remove the `source_id -> target_id` dependency.
    RemoveDependency {
        source_id: NodeId,
        target_id: NodeId,
    },
    /// Replace the editable attributes of the currently selected node.
    UpdateAttributes { id: NodeId, attrs: NodeAttributes },
}

/// The editable attribute set, as saved from the side panel in one shot.
#[derive(Debug, Clone, Default)]
pub struct NodeAttributes {
    pub name: String,
    pub image: String,
    pub description: String,
    pub waiting: bool,
    pub hidden: bool,
    pub done: bool,
    pub job: bool,
    pub visible_days: Option<Vec<u8>>,
    pub start_time: Option<u16>,
    pub end_time: Option<u16>,
}

impl NodeAttributes {
    /// Snapshot the editable attributes of an existing node, e.g. to tweak
    /// a few fields and write the rest back unchanged.
    pub fn from_node(node: &Node) -> Self {
        Self {
            name: node.name.clone(),
            image: node.image.clone(),
            description: node.description.clone(),
            waiting: node.waiting,
            hidden: node.hidden,
            done: node.done,
            job: node.job,
            visible_days: node.visible_days.clone(),
            start_time: node.start_time,
            end_time: node.end_time,
        }
    }

    pub(crate) fn apply_to(self, node: &mut Node) {
        node.name = self.name;
        node.image = self.image;
        node.description = self.description;
        node.waiting = self.waiting;
        node.hidden = self.hidden;
        node.done = self.done;
        node.job = self.job;
        node.visible_days = self.visible_days;
        node.start_time = self.start_time;
        node.end_time = self.end_time;
    }
}
