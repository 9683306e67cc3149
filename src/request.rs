use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{description::PackageJson, path_kind::PathKind};

/// Markers individual steps attach to a request to avoid re-trying
/// themselves forever, e.g. "already consulted the main field for this
/// description file". Purely a cycle-breaker, never inspected by the
/// dispatch machinery itself.
#[derive(Debug, Clone, Default)]
pub struct ContextSet(HashSet<String>);

impl ContextSet {
    /// Records `marker`, returning `true` if it was not already present
    /// (i.e. the caller is free to proceed).
    pub fn mark(&mut self, marker: impl Into<String>) -> bool {
        self.0.insert(marker.into())
    }

    pub fn has(&self, marker: &str) -> bool {
        self.0.contains(marker)
    }
}

/// The unit of work carried through the hook graph (§3).
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// The absolute directory currently under consideration.
    pub path: PathBuf,
    /// The remaining textual request, empty once a terminal resolution is
    /// reached.
    pub request: String,
    /// `request`'s classification, re-derived whenever `request` changes.
    pub kind: PathKind,
    /// Trailing `?...` fragment, without the leading `?`.
    pub query: String,
    /// Trailing `#...` fragment, without the leading `#` (not to be
    /// confused with an internal specifier, which keeps its `#`).
    pub fragment: String,
    /// True iff `request` needs a bare-module lookup.
    pub module: bool,
    /// True iff `request` ends with `/` (directory semantics enforced).
    pub directory: bool,
    pub description_file_path: Option<PathBuf>,
    pub description_file_root: Option<PathBuf>,
    pub description_file_data: Option<Arc<PackageJson>>,
    /// `path` expressed relative to `description_file_root`, when set.
    pub relative_path: Option<PathBuf>,
    pub context: ContextSet,
}

impl ResolveRequest {
    pub fn new(path: PathBuf, request: String) -> Self {
        let kind = crate::path_kind::classify(&request);
        let directory = request.ends_with('/') || request.ends_with('\\');
        Self {
            path,
            module: kind == PathKind::Normal,
            kind,
            directory,
            request,
            query: String::new(),
            fragment: String::new(),
            description_file_path: None,
            description_file_root: None,
            description_file_data: None,
            relative_path: None,
            context: ContextSet::default(),
        }
    }

    /// `path` joined with `request`, the combination a terminal resolution
    /// points at. Collapses `.`/`..` so in-memory filesystem lookups never
    /// see a literal parent-dir component.
    ///
    /// `AppendPlugin` leaves `request` as a bare extension tail (e.g. `.js`)
    /// rather than a path segment; that case is appended onto `path`'s own
    /// string via concatenation, not `Path::join`, since `join` would insert
    /// a separator and turn `foo.js` into `foo/.js`.
    pub fn resolved_path(&self) -> PathBuf {
        if self.request.is_empty() {
            self.path.clone()
        } else if is_extension_tail(&self.request) {
            let mut joined = self.path.clone().into_os_string();
            joined.push(&self.request);
            PathBuf::from(joined)
        } else {
            crate::normalize::normalize(&self.path.join(&self.request))
        }
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = path;
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.request = target.into();
        self.kind = crate::path_kind::classify(&self.request);
        self.module = self.kind == PathKind::Normal;
        self.directory = self.request.ends_with('/') || self.request.ends_with('\\');
        self
    }

    pub fn with_description_file(
        mut self,
        path: PathBuf,
        root: PathBuf,
        data: Arc<PackageJson>,
    ) -> Self {
        self.relative_path = pathdiff(&self.path, &root);
        self.description_file_path = Some(path);
        self.description_file_root = Some(root);
        self.description_file_data = Some(data);
        self
    }

    /// A stable key identifying this request, used both for the unsafe
    /// cache and for cycle detection in `do_resolve`.
    pub fn fingerprint(&self, with_context: bool) -> String {
        if with_context {
            format!(
                "{}\0{}\0{}\0{}",
                self.path.display(),
                self.request,
                self.query,
                self.fragment
            )
        } else {
            format!("{}\0{}\0{}", self.request, self.query, self.fragment)
        }
    }
}

/// `path` relative to `base`, when `base` is a prefix of `path`.
fn pathdiff(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(Path::to_path_buf)
}

/// True for `AppendPlugin`'s `.ext` tails: starts with `.` but isn't `.`,
/// `..`, or a relative path segment (`./x`, `../x`) in disguise.
fn is_extension_tail(request: &str) -> bool {
    request.starts_with('.')
        && request != "."
        && request != ".."
        && !request.starts_with("./")
        && !request.starts_with("../")
        && !request.starts_with(".\\")
        && !request.starts_with("..\\")
}
