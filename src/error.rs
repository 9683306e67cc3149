use std::path::PathBuf;

use crate::fs::FsError;

/// The error kinds a resolution can surface, per §7 of the design doc.
///
/// `NotFound` never reaches a caller: it is recovered locally by the step
/// that observed it (steps yield instead of propagating a missing file).
/// It exists here only so `FsError` conversions have somewhere to land
/// before a step decides what to do with them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    #[error("{path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("request '{request}' is aliased to false in '{context}'")]
    AliasedToFalse { request: String, context: String },

    #[error("recursive resolution of '{request}' on hook '{hook}'")]
    Recursion { hook: &'static str, request: String },

    #[error("can't resolve '{request}' in '{}'", context.display())]
    NoResolution {
        request: String,
        context: PathBuf,
        trace: Vec<String>,
    },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid description file at {path}: {message}")]
    DescriptionFile { path: PathBuf, message: String },

    #[error("{0}")]
    PackageManager(String),
}

impl ResolveError {
    /// The accumulated dispatch trace, populated only for [`ResolveError::NoResolution`]
    /// when the caller opted in via [`crate::context::ResolveContext::with_trace`].
    pub fn trace(&self) -> &[String] {
        match self {
            ResolveError::NoResolution { trace, .. } => trace,
            _ => &[],
        }
    }
}

impl From<FsError> for ResolveError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::NotFound(path) => ResolveError::Io {
                path,
                message: "not found".to_string(),
            },
            FsError::Io { path, message } => ResolveError::Io { path, message },
        }
    }
}
