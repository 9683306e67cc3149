use std::path::{Component, Path, PathBuf};

/// Collapses `.` and `..` components without touching the filesystem
/// (unlike `Path::canonicalize`, which also resolves symlinks and requires
/// the path to exist). Every join performed while threading a request
/// through the pipeline goes through this, so `MemoryFileSystem` lookups
/// never see a literal `..` component.
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_dot_and_dotdot() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/a/b/..")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("a/./b")), PathBuf::from("a/b"));
    }
}
