// src/persist/json.rs

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tracing::debug;

use crate::errors::Result;
use crate::graph::Node;
use crate::persist::Persistence;

/// File-backed store holding the node collection as one JSON document,
/// compatible with the original `techTreeData.json`.
///
/// A missing file loads as an empty graph. Saves write a sibling temp file
/// and rename it over the target, so an interrupted save leaves the
/// previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Persistence for JsonFileStore {
    fn load(&self) -> Pin<Box<dyn Future<Output = Result<Vec<Node>>> + Send + '_>> {
        let path = self.path.clone();

        Box::pin(async move {
            if !path.exists() {
                debug!(path = ?path, "no data file yet; starting with an empty graph");
                return Ok(Vec::new());
            }

            let contents = tokio::fs::read_to_string(&path).await?;
            let nodes: Vec<Node> = serde_json::from_str(&contents)?;
            Ok(nodes)
        })
    }

    fn save(&mut self, nodes: Vec<Node>) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let path = self.path.clone();

        Box::pin(async move {
            let json = serde_json::to_string_pretty(&nodes)?;

            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }

            let tmp = path.with_extension("json.tmp");
            tokio::fs::write(&tmp, json).await?;
            tokio::fs::rename(&tmp, &path).await?;

            debug!(path = ?path, nodes = nodes.len(), "saved graph");
            Ok(())
        })
    }
}
