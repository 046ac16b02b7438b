// src/layout/mod.rs

//! 2D layout of a layered tech tree.
//!
//! - [`engine`] turns a level map plus a node subset into per-node
//!   coordinates.
//! - [`bounds`] sizes the enclosing container for the rendered result.

pub mod bounds;
pub mod engine;

pub use bounds::{Extent, container_size};
pub use engine::{LayoutOptions, Point, compute_positions};
