// src/view/mod.rs

//! View classification.
//!
//! Each tab of the UI shows the nodes matching one predicate over the
//! graph, the wall clock and the job-mode toggle. [`schedule`] holds the
//! day/time gating used by the free view; [`clock`] abstracts wall-clock
//! access so tests can pin a moment.

pub mod clock;
pub mod schedule;

pub use clock::{Clock, FixedClock, Moment, SystemClock};

use crate::graph::node::Node;
use crate::graph::store::GraphStore;
use crate::types::ViewKind;

/// Everything beyond the node itself that view predicates depend on.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext {
    /// The job-mode toggle: on shows only `job` nodes in the free view,
    /// off shows only non-`job` nodes.
    pub job_mode: bool,
    /// Current wall-clock moment.
    pub moment: Moment,
}

/// Does `node` belong to `view`?
pub fn matches(node: &Node, view: ViewKind, ctx: &ViewContext) -> bool {
    match view {
        ViewKind::TechTree => !node.done,
        ViewKind::DoneTree => node.done && !node.hidden,
        ViewKind::Free => {
            node.dependencies.is_empty()
                && !node.waiting
                && !node.hidden
                && !node.done
                && node.job == ctx.job_mode
                && schedule::day_visible(node, ctx.moment.weekday)
                && schedule::time_visible(node, ctx.moment.minutes)
        }
        ViewKind::Waiting => {
            node.dependencies.is_empty() && node.waiting && !node.hidden && !node.done
        }
    }
}

/// All nodes matching `view`, in store (id) order.
pub fn filter_nodes<'a>(
    store: &'a GraphStore,
    view: ViewKind,
    ctx: &ViewContext,
) -> Vec<&'a Node> {
    store.nodes().filter(|node| matches(node, view, ctx)).collect()
}
