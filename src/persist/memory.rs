// src/persist/memory.rs

use std::future::Future;
use std::pin::Pin;

use crate::errors::{Result, TechdagError};
use crate::graph::Node;
use crate::persist::Persistence;

/// In-memory persistence, for tests and throwaway sessions.
///
/// `fail_saves` simulates a storage outage: saves return an error and leave
/// the previously "persisted" collection untouched, which is exactly the
/// contract the session relies on.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    nodes: Vec<Node>,
    fail_saves: bool,
    save_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }

    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// The last successfully saved collection.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> Pin<Box<dyn Future<Output = Result<Vec<Node>>> + Send + '_>> {
        let nodes = self.nodes.clone();
        Box::pin(async move { Ok(nodes) })
    }

    fn save(&mut self, nodes: Vec<Node>) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            if self.fail_saves {
                return Err(TechdagError::Persistence(
                    "simulated save failure".to_string(),
                ));
            }
            self.nodes = nodes;
            self.save_count += 1;
            Ok(())
        })
    }
}
