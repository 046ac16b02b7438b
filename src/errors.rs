// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TechdagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Node already exists: {0}")]
    DuplicateNode(String),

    #[error("Dependency already exists: {source_id} -> {target_id}")]
    DuplicateEdge {
        source_id: String,
        target_id: String,
    },

    #[error("Dependency not found: {source_id} -> {target_id}")]
    DependencyNotFound {
        source_id: String,
        target_id: String,
    },

    #[error("A node cannot depend on itself: {0}")]
    SelfDependency(String),

    #[error("Cycle detected in dependency graph: {0}")]
    CycleDetected(String),

    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TechdagError>;
