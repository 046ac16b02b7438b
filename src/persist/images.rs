// src/persist/images.rs

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tracing::info;

use crate::errors::Result;

/// External image storage: bytes in, opaque path reference out.
///
/// The returned string is stored verbatim on the node; nothing in the core
/// ever interprets it beyond passing it along.
pub trait ImageStore: Send {
    fn store(
        &mut self,
        bytes: Vec<u8>,
        original_name: String,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>>;
}

/// Stores images under a directory, named by the blake3 hash of their
/// content with the original extension preserved. Identical uploads land
/// on the same file.
#[derive(Debug, Clone)]
pub struct FileImageStore {
    root: PathBuf,
}

impl FileImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageStore for FileImageStore {
    fn store(
        &mut self,
        bytes: Vec<u8>,
        original_name: String,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        let root = self.root.clone();

        Box::pin(async move {
            let hash = blake3::hash(&bytes).to_hex().to_string();
            let file_name = match Path::new(&original_name)
                .extension()
                .and_then(|ext| ext.to_str())
            {
                Some(ext) => format!("{hash}.{ext}"),
                None => hash,
            };

            tokio::fs::create_dir_all(&root).await?;
            tokio::fs::write(root.join(&file_name), &bytes).await?;

            info!(image = %file_name, bytes = bytes.len(), "stored image");
            Ok(format!("/images/{file_name}"))
        })
    }
}
