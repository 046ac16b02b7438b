// src/engine/session.rs

//! Async shell around the pure [`GraphEngine`].
//!
//! Every mutation is a round-trip: apply the command in memory, then await
//! a whole-collection save before accepting the next one. A failed save
//! keeps the in-memory graph (the user's edits survive); [`Session::reload`]
//! is the manual reconciliation path against whatever the backend holds.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::{info, warn};

use crate::engine::{Command, GraphEngine};
use crate::errors::{Result, TechdagError};
use crate::graph::cycle::validate_acyclic;
use crate::graph::{GraphStore, Node, assign_levels};
use crate::layout::engine::Point;
use crate::layout::{LayoutOptions, compute_positions};
use crate::persist::Persistence;
use crate::types::{NodeId, ViewKind};
use crate::view::{ViewContext, filter_nodes};

/// One view, fully computed: the matching nodes plus, for tree views, their
/// levels and positions.
#[derive(Debug, Clone)]
pub struct RenderedView {
    pub view: ViewKind,
    /// Matching nodes in store order.
    pub nodes: Vec<Node>,
    /// Empty for the flat list views.
    pub levels: HashMap<NodeId, u32>,
    /// Empty for the flat list views.
    pub positions: BTreeMap<NodeId, Point>,
}

/// A single-editor session over one persisted graph.
pub struct Session<P: Persistence> {
    engine: GraphEngine,
    persistence: P,
}

impl<P: Persistence> fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl<P: Persistence> Session<P> {
    /// Load the persisted collection, validate it is acyclic, and start a
    /// session over it.
    pub async fn load(persistence: P) -> Result<Self> {
        let mut session = Self {
            engine: GraphEngine::default(),
            persistence,
        };
        session.reload().await?;
        Ok(session)
    }

    pub fn store(&self) -> &GraphStore {
        self.engine.store()
    }

    /// Access the persistence backend (used by tests to inspect saves).
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    /// Re-fetch the persisted collection and replace the in-memory graph,
    /// discarding any local state that never made it to a successful save.
    pub async fn reload(&mut self) -> Result<()> {
        let nodes = self
            .persistence
            .load()
            .await
            .map_err(|e| TechdagError::Persistence(e.to_string()))?;
        let store = GraphStore::from_nodes(nodes);
        validate_acyclic(&store)?;
        info!(nodes = store.len(), "loaded graph");
        self.engine.set_store(store);
        Ok(())
    }

    /// Apply one command and persist the result.
    ///
    /// Validation errors leave both the memory and the persisted state
    /// untouched. A persistence error after a successful apply keeps the
    /// in-memory change and surfaces [`TechdagError::Persistence`]; retry
    /// is manual (re-dispatch or [`Self::reload`]).
    pub async fn dispatch(&mut self, command: Command) -> Result<()> {
        self.engine.apply(command)?;
        self.persist().await
    }

    async fn persist(&mut self) -> Result<()> {
        let nodes = self.engine.store().to_nodes();
        self.persistence.save(nodes).await.map_err(|e| {
            warn!(error = %e, "saving graph failed; in-memory edits retained");
            TechdagError::Persistence(e.to_string())
        })
    }

    /// Level map for the whole graph under the given view's policy.
    pub fn levels(&self, view: ViewKind) -> Result<HashMap<NodeId, u32>> {
        assign_levels(self.engine.store(), view.level_policy())
    }

    /// Compute one view: filter, and for tree views assign levels and lay
    /// the subset out. A cycle reported by level assignment aborts before
    /// any position is computed, so the previous render stays valid.
    pub fn render(
        &self,
        view: ViewKind,
        ctx: &ViewContext,
        opts: &LayoutOptions,
    ) -> Result<RenderedView> {
        let store = self.engine.store();
        let subset = filter_nodes(store, view, ctx);

        let (levels, positions) = if view.is_tree() {
            let levels = assign_levels(store, view.level_policy())?;
            let positions = compute_positions(store, &levels, &subset, view.level_policy(), opts);
            (levels, positions)
        } else {
            (HashMap::new(), BTreeMap::new())
        };

        Ok(RenderedView {
            view,
            nodes: subset.into_iter().cloned().collect(),
            levels,
            positions,
        })
    }
}
