use std::path::{Path, PathBuf};

/// Ambient diagnostics threaded alongside a resolve, independent of any
/// single request (§3 `ResolveContext`).
#[derive(Debug, Default)]
pub struct ResolveContext {
    trace: Option<Vec<String>>,
    /// Live fork stack: `(hook, fingerprint)` pairs currently being
    /// resolved, used to reject recursive forks in `Resolver::do_resolve`.
    stack: Vec<(&'static str, String)>,
    depth: usize,
    file_dependencies: Option<Vec<PathBuf>>,
    missing_dependencies: Option<Vec<PathBuf>>,
}

impl ResolveContext {
    /// Enables trace collection; every hook dispatch and fork appends a
    /// line, surfaced on a `NoResolution` error.
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    pub fn with_dependency_tracking(mut self) -> Self {
        self.file_dependencies = Some(Vec::new());
        self.missing_dependencies = Some(Vec::new());
        self
    }

    pub(crate) fn trace(&mut self, line: impl Into<String>) {
        if let Some(trace) = &mut self.trace {
            trace.push(format!("{}{}", "  ".repeat(self.depth), line.into()));
        }
    }

    pub fn take_trace(&mut self) -> Vec<String> {
        self.trace.take().unwrap_or_default()
    }

    pub fn add_file_dependency(&mut self, path: &Path) {
        if let Some(deps) = &mut self.file_dependencies {
            deps.push(path.to_path_buf());
        }
    }

    pub fn add_missing_dependency(&mut self, path: &Path) {
        if let Some(deps) = &mut self.missing_dependencies {
            deps.push(path.to_path_buf());
        }
    }

    pub fn file_dependencies(&self) -> &[PathBuf] {
        self.file_dependencies.as_deref().unwrap_or_default()
    }

    pub fn missing_dependencies(&self) -> &[PathBuf] {
        self.missing_dependencies.as_deref().unwrap_or_default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Pushes `(hook, fingerprint)` onto the live fork stack. Returns
    /// `false` (and leaves the stack untouched) if that pair is already
    /// live; the caller must treat this as a recursion error.
    pub(crate) fn enter(&mut self, hook: &'static str, fingerprint: String) -> bool {
        if self
            .stack
            .iter()
            .any(|(h, f)| *h == hook && f == &fingerprint)
        {
            return false;
        }
        self.stack.push((hook, fingerprint));
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.stack.pop();
        self.depth = self.depth.saturating_sub(1);
    }
}
