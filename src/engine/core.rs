// src/engine/core.rs

//! Pure command application.
//!
//! [`GraphEngine`] owns the in-memory [`GraphStore`] and applies commands
//! with full validation, but performs no IO. Persistence wraps around it in
//! [`super::session`], so everything here can be unit tested without Tokio
//! or a filesystem.

use tracing::debug;

use crate::engine::{Command, NodeAttributes};
use crate::errors::{Result, TechdagError};
use crate::graph::cycle::would_create_cycle;
use crate::graph::{GraphStore, Node};

#[derive(Debug, Clone, Default)]
pub struct GraphEngine {
    store: GraphStore,
}

impl GraphEngine {
    pub fn new(store: GraphStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Replace the whole store, e.g. after a reload from persistence.
    pub fn set_store(&mut self, store: GraphStore) {
        self.store = store;
    }

    /// Apply one command, validating before any mutation. A returned error
    /// means the store is unchanged.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::AddNode(node) => self.add_node(node),
            Command::DeleteNode { id } => self.delete_node(&id),
            Command::AddDependency {
                source_id,
                target_id,
            } => self.add_dependency(&source_id, &target_id),
            Command::RemoveDependency {
                source_id,
                target_id,
            } => self.remove_dependency(&source_id, &target_id),
            Command::UpdateAttributes { id, attrs } => self.update_attributes(&id, attrs),
        }
    }

    fn add_node(&mut self, node: Node) -> Result<()> {
        if self.store.contains(&node.id) {
            return Err(TechdagError::DuplicateNode(node.id));
        }
        debug!(node = %node.id, "adding node");
        self.store.insert(node);
        Ok(())
    }

    fn delete_node(&mut self, id: &str) -> Result<()> {
        match self.store.remove(id) {
            Some(_) => Ok(()),
            None => Err(TechdagError::NodeNotFound(id.to_string())),
        }
    }

    /// The edge addition protocol: reject self-dependencies, duplicates and
    /// anything that would close a loop, in that order.
    fn add_dependency(&mut self, source_id: &str, target_id: &str) -> Result<()> {
        if source_id == target_id {
            return Err(TechdagError::SelfDependency(source_id.to_string()));
        }

        let target = self
            .store
            .get(target_id)
            .ok_or_else(|| TechdagError::NodeNotFound(target_id.to_string()))?;

        if !self.store.contains(source_id) {
            return Err(TechdagError::NodeNotFound(source_id.to_string()));
        }

        if target.depends_on(source_id) {
            return Err(TechdagError::DuplicateEdge {
                source_id: source_id.to_string(),
                target_id: target_id.to_string(),
            });
        }

        if would_create_cycle(&self.store, source_id, target_id) {
            return Err(TechdagError::CycleDetected(format!(
                "{source_id} -> {target_id}"
            )));
        }

        debug!(source = %source_id, target = %target_id, "adding dependency");
        self.store.add_dependency(source_id, target_id);
        Ok(())
    }

    fn remove_dependency(&mut self, source_id: &str, target_id: &str) -> Result<()> {
        if !self.store.contains(target_id) {
            return Err(TechdagError::NodeNotFound(target_id.to_string()));
        }

        if self.store.remove_dependency(source_id, target_id) {
            debug!(source = %source_id, target = %target_id, "removed dependency");
            Ok(())
        } else {
            Err(TechdagError::DependencyNotFound {
                source_id: source_id.to_string(),
                target_id: target_id.to_string(),
            })
        }
    }

    fn update_attributes(&mut self, id: &str, attrs: NodeAttributes) -> Result<()> {
        let node = self
            .store
            .get_mut(id)
            .ok_or_else(|| TechdagError::NodeNotFound(id.to_string()))?;
        attrs.apply_to(node);
        debug!(node = %id, "updated attributes");
        Ok(())
    }
}
