//! The async `FileSystem` port and its implementations.
//!
//! The resolution pipeline never touches `std::fs` directly; every I/O call
//! goes through this trait so tests can swap in [`MemoryFileSystem`] and
//! production code can swap in [`OsFileSystem`] or a [`sync::SyncFsAdapter`]
//! around a blocking implementation.

mod memory;
mod os;
mod stat_cache;
pub mod sync;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

pub use memory::MemoryFileSystem;
pub use os::OsFileSystem;
pub use stat_cache::CachedFileSystem;

/// Coarse file kind, enough for the steps that branch on file-vs-directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Directory,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub kind: FileKind,
}

impl Metadata {
    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }
}

/// I/O failures tagged so steps can tell "not there" apart from "broken".
#[derive(Debug, Clone, thiserror::Error)]
pub enum FsError {
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("io error at {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl FsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }
}

/// The abstract, asynchronous filesystem the resolver is built on.
///
/// Every call is a potential suspension point (§5); nothing else in the
/// pipeline awaits anything but this trait, a cache, or a nested fork.
#[async_trait]
pub trait FileSystem: Send + Sync + std::fmt::Debug {
    async fn stat(&self, path: &Path) -> Result<Metadata, FsError>;
    async fn read_dir(&self, path: &Path) -> Result<Vec<String>, FsError>;
    async fn read_file(&self, path: &Path) -> Result<String, FsError>;
    async fn read_link(&self, path: &Path) -> Result<PathBuf, FsError>;
}

/// Follow every symlink in `path`, component by component, returning the
/// canonical path. Used by [`crate::plugin::symlink::SymlinkPlugin`].
pub async fn canonicalize(fs: &dyn FileSystem, path: &Path) -> Result<PathBuf, FsError> {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        let mut hops = 0u8;
        loop {
            match fs.read_link(&current).await {
                Ok(target) => {
                    hops += 1;
                    if hops > 40 {
                        return Err(FsError::Io {
                            path: path.to_path_buf(),
                            message: "too many levels of symbolic links".to_string(),
                        });
                    }
                    current = if target.is_absolute() {
                        target
                    } else {
                        current
                            .parent()
                            .map(|p| p.join(&target))
                            .unwrap_or(target)
                    };
                }
                Err(FsError::NotFound(_)) => break,
                Err(e) => return Err(e),
            }
        }
    }
    Ok(current)
}
