use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use dashmap::DashMap;

use crate::{description::PackageJson, error::ResolveError, fs::FileSystem, request::ResolveRequest};

/// Caches the nearest ancestor description file for a directory, keyed by
/// that directory (not by the description file's own path, since most
/// directories have none and would otherwise be re-walked on every
/// lookup). Populated lazily; cleared only by `Resolver::clear_cache`.
#[derive(Debug, Default)]
pub struct DescriptionFileCache {
    by_dir: DashMap<PathBuf, Option<Arc<PackageJson>>>,
}

impl DescriptionFileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&self) {
        self.by_dir.clear();
    }

    /// Walks `start_dir` and its ancestors looking for any file in `names`,
    /// returning the first one found.
    pub async fn load_ancestor(
        &self,
        fs: &dyn FileSystem,
        names: &[String],
        start_dir: &Path,
    ) -> Result<Option<Arc<PackageJson>>, ResolveError> {
        let mut dir = Some(start_dir.to_path_buf());
        while let Some(d) = dir {
            let found = match self.by_dir.get(&d) {
                Some(entry) => entry.clone(),
                None => {
                    let found = self.load_at(fs, names, &d).await?;
                    self.by_dir.insert(d.clone(), found.clone());
                    found
                }
            };
            if let Some(pkg) = found {
                return Ok(Some(pkg));
            }
            dir = d.parent().map(Path::to_path_buf);
        }
        Ok(None)
    }

    async fn load_at(
        &self,
        fs: &dyn FileSystem,
        names: &[String],
        dir: &Path,
    ) -> Result<Option<Arc<PackageJson>>, ResolveError> {
        for name in names {
            let candidate = dir.join(name);
            match fs.read_file(&candidate).await {
                Ok(text) => {
                    let pkg = PackageJson::parse(candidate, &text)?;
                    return Ok(Some(Arc::new(pkg)));
                }
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(None)
    }
}

/// The process-wide request-fingerprint → resolution memo consulted by
/// `UnsafeCachePlugin` at the very front of the pipeline. "Unsafe" because
/// it is never invalidated by filesystem changes, only by
/// `Resolver::clear_cache` or process restart.
#[derive(Debug, Default)]
pub struct UnsafeCache {
    entries: DashMap<String, ResolveRequest>,
}

impl UnsafeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<ResolveRequest> {
        self.entries.get(key).map(|e| e.clone())
    }

    pub fn insert(&self, key: String, value: ResolveRequest) {
        self.entries.insert(key, value);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
