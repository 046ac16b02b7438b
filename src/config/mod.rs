// src/config/mod.rs

//! Optional TOML configuration (`Techdag.toml`).
//!
//! - [`model`] maps the file one-to-one onto serde structs with defaults.
//! - [`loader`] reads and validates.
//! - [`validate`] holds the semantic checks.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_or_default};
pub use model::{ConfigFile, DataSection, LayoutSection, RawConfigFile, ViewSection};
