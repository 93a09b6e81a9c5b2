//! Filesystem capability for the copy path.

use std::path::Path;

use async_trait::async_trait;

use crate::error::ResizeError;

/// Delegated file copy operation.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Copy `source` to `dest`, creating intermediate directories as needed.
    async fn copy_file(&self, source: &Path, dest: &Path) -> Result<(), ResizeError>;
}

/// Production [`FileStore`] backed by `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileStore for LocalStore {
    async fn copy_file(&self, source: &Path, dest: &Path) -> Result<(), ResizeError> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::copy(source, dest).await?;
        Ok(())
    }
}
