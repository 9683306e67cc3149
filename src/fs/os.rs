use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{FileKind, FileSystem, FsError, Metadata};

/// A thin `tokio::fs` wrapper; the filesystem a `resolve()` call sees when
/// driven against the real operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

fn tag_not_found(path: &Path, err: std::io::Error) -> FsError {
    if err.kind() == std::io::ErrorKind::NotFound {
        FsError::NotFound(path.to_path_buf())
    } else {
        FsError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl FileSystem for OsFileSystem {
    async fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| tag_not_found(path, e))?;
        let kind = if meta.is_dir() {
            FileKind::Directory
        } else if meta.is_file() {
            FileKind::File
        } else {
            FileKind::Other
        };
        Ok(Metadata { kind })
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<String>, FsError> {
        let mut entries = tokio::fs::read_dir(path)
            .await
            .map_err(|e| tag_not_found(path, e))?;
        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| tag_not_found(path, e))?
        {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    async fn read_file(&self, path: &Path) -> Result<String, FsError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| tag_not_found(path, e))
    }

    async fn read_link(&self, path: &Path) -> Result<PathBuf, FsError> {
        tokio::fs::read_link(path)
            .await
            .map_err(|e| tag_not_found(path, e))
    }
}
