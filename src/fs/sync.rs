use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;

use super::{FileSystem, FsError, Metadata};

/// A blocking filesystem implementation, for callers whose `fs` layer has no
/// async story (`options.use_sync_file_system_calls`).
pub trait SyncFileSystem: Send + Sync + std::fmt::Debug {
    fn stat(&self, path: &Path) -> Result<Metadata, FsError>;
    fn read_dir(&self, path: &Path) -> Result<Vec<String>, FsError>;
    fn read_file(&self, path: &Path) -> Result<String, FsError>;
    fn read_link(&self, path: &Path) -> Result<PathBuf, FsError>;
}

/// Runs a [`SyncFileSystem`] on the blocking thread pool so it can satisfy
/// the async [`FileSystem`] port without stalling the resolver's executor.
#[derive(Debug, Clone)]
pub struct SyncFsAdapter<S>(pub Arc<S>);

impl<S> SyncFsAdapter<S> {
    pub fn new(inner: S) -> Self {
        Self(Arc::new(inner))
    }
}

#[async_trait]
impl<S: SyncFileSystem + 'static> FileSystem for SyncFsAdapter<S> {
    async fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        let inner = self.0.clone();
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || inner.stat(&path))
            .await
            .expect("sync filesystem task panicked")
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<String>, FsError> {
        let inner = self.0.clone();
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || inner.read_dir(&path))
            .await
            .expect("sync filesystem task panicked")
    }

    async fn read_file(&self, path: &Path) -> Result<String, FsError> {
        let inner = self.0.clone();
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || inner.read_file(&path))
            .await
            .expect("sync filesystem task panicked")
    }

    async fn read_link(&self, path: &Path) -> Result<PathBuf, FsError> {
        let inner = self.0.clone();
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || inner.read_link(&path))
            .await
            .expect("sync filesystem task panicked")
    }
}
