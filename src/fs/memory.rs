use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::RwLock,
};

use async_trait::async_trait;

use super::{FileKind, FileSystem, FsError, Metadata};

#[derive(Debug, Clone)]
enum Node {
    File(String),
    Dir(BTreeMap<String, Node>),
    Symlink(PathBuf),
}

/// An in-memory filesystem tree, built programmatically, used by the
/// fixture-driven test-suite so it never has to touch disk.
///
/// ```
/// use hookrover::fs::MemoryFileSystem;
///
/// let fs = MemoryFileSystem::new();
/// fs.add_file("/project/src/foo.js", "module.exports = 1;");
/// fs.add_dir("/project/src/bar");
/// ```
#[derive(Debug)]
pub struct MemoryFileSystem {
    root: RwLock<Node>,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn components(path: &Path) -> Vec<String> {
    crate::normalize::normalize(path)
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Node::Dir(BTreeMap::new())),
        }
    }

    fn insert(&self, path: &Path, node: Node) {
        let parts = components(path);
        let mut root = self.root.write().unwrap();
        let mut cursor = &mut *root;
        for (i, part) in parts.iter().enumerate() {
            let Node::Dir(children) = cursor else {
                panic!("cannot descend into non-directory at {part}");
            };
            if i + 1 == parts.len() {
                children.insert(part.clone(), node);
                return;
            }
            cursor = children
                .entry(part.clone())
                .or_insert_with(|| Node::Dir(BTreeMap::new()));
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<String>) {
        self.insert(path.as_ref(), Node::File(contents.into()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), Node::Dir(BTreeMap::new()));
    }

    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl Into<PathBuf>) {
        self.insert(path.as_ref(), Node::Symlink(target.into()));
    }

    fn lookup(&self, path: &Path) -> Option<Node> {
        let parts = components(path);
        let root = self.root.read().unwrap();
        let mut cursor = &*root;
        for part in &parts {
            match cursor {
                Node::Dir(children) => cursor = children.get(part)?,
                _ => return None,
            }
        }
        Some(cursor.clone())
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        match self.lookup(path) {
            Some(Node::File(_)) => Ok(Metadata {
                kind: FileKind::File,
            }),
            Some(Node::Dir(_)) => Ok(Metadata {
                kind: FileKind::Directory,
            }),
            Some(Node::Symlink(_)) => Ok(Metadata {
                kind: FileKind::Other,
            }),
            None => Err(FsError::NotFound(path.to_path_buf())),
        }
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<String>, FsError> {
        match self.lookup(path) {
            Some(Node::Dir(children)) => Ok(children.keys().cloned().collect()),
            Some(_) => Err(FsError::Io {
                path: path.to_path_buf(),
                message: "not a directory".to_string(),
            }),
            None => Err(FsError::NotFound(path.to_path_buf())),
        }
    }

    async fn read_file(&self, path: &Path) -> Result<String, FsError> {
        match self.lookup(path) {
            Some(Node::File(contents)) => Ok(contents),
            Some(_) => Err(FsError::Io {
                path: path.to_path_buf(),
                message: "not a file".to_string(),
            }),
            None => Err(FsError::NotFound(path.to_path_buf())),
        }
    }

    async fn read_link(&self, path: &Path) -> Result<PathBuf, FsError> {
        match self.lookup(path) {
            Some(Node::Symlink(target)) => Ok(target),
            Some(_) => Err(FsError::NotFound(path.to_path_buf())),
            None => Err(FsError::NotFound(path.to_path_buf())),
        }
    }
}
