use std::{
    hash::BuildHasherDefault,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use dashmap::DashMap;
use rustc_hash::FxHasher;

use super::{FileSystem, FsError, Metadata};

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Wraps a [`FileSystem`] with a process-wide `stat` memo.
///
/// Resolution revisits the same directories constantly (every ancestor is
/// statted once per `node_modules` lookup, every description-file walk
/// restats the chain it just walked); this cache turns that into one real
/// syscall per distinct path for the lifetime of the `Resolver`.
#[derive(Debug)]
pub struct CachedFileSystem<F> {
    inner: F,
    stats: DashMap<PathBuf, Result<Metadata, FsError>, FxBuildHasher>,
}

impl<F: FileSystem> CachedFileSystem<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            stats: DashMap::with_hasher(FxBuildHasher::default()),
        }
    }

    pub fn clear(&self) {
        self.stats.clear();
    }
}

#[async_trait]
impl<F: FileSystem> FileSystem for CachedFileSystem<F> {
    async fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        if let Some(cached) = self.stats.get(path) {
            return cached.clone();
        }
        let result = self.inner.stat(path).await;
        self.stats.insert(path.to_path_buf(), result.clone());
        result
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<String>, FsError> {
        self.inner.read_dir(path).await
    }

    async fn read_file(&self, path: &Path) -> Result<String, FsError> {
        self.inner.read_file(path).await
    }

    async fn read_link(&self, path: &Path) -> Result<PathBuf, FsError> {
        self.inner.read_link(path).await
    }
}
