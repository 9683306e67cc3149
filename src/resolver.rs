use std::{fmt, path::Path, sync::Arc};

use crate::{
    cache::{DescriptionFileCache, UnsafeCache},
    context::ResolveContext,
    description::PackageJson,
    error::ResolveError,
    hook::{HookRegistry, StepOutcome},
    options::ResolverOptions,
    request::ResolveRequest,
};

/// A successfully (or deliberately not) resolved request.
#[derive(Debug, Clone)]
pub enum ResolveResult {
    Resource(Resource),
    /// The request matched an `alias: false` entry.
    Ignored,
}

/// A terminal resolution: an absolute path plus whatever description-file
/// context the pipeline picked up along the way.
#[derive(Debug, Clone)]
pub struct Resource {
    pub path: std::path::PathBuf,
    pub query: String,
    pub fragment: String,
    pub description_file_path: Option<std::path::PathBuf>,
    pub description_file_data: Option<Arc<PackageJson>>,
}

impl Resource {
    fn from_request(request: &ResolveRequest) -> Self {
        Self {
            path: request.path.clone(),
            query: request.query.clone(),
            fragment: request.fragment.clone(),
            description_file_path: request.description_file_path.clone(),
            description_file_data: request.description_file_data.clone(),
        }
    }
}

/// Owns the hook registry, the caches, and the option record for one build
/// session. Cheap to share: clone the `Arc` the factory hands back rather
/// than constructing a second `Resolver` with the same options.
pub struct Resolver {
    pub options: ResolverOptions,
    pub(crate) hooks: HookRegistry,
    pub(crate) description_cache: DescriptionFileCache,
    pub(crate) unsafe_cache: Arc<UnsafeCache>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").field("options", &self.options).finish()
    }
}

impl Resolver {
    /// Assembles a fully-taped resolver from `options` (§4.2). See
    /// [`crate::factory::ResolverFactory`] for the assembly order.
    pub fn new(options: ResolverOptions) -> Self {
        crate::factory::ResolverFactory::new(options).build()
    }

    pub(crate) fn from_parts(options: ResolverOptions, hooks: HookRegistry) -> Self {
        Self {
            options,
            hooks,
            description_cache: DescriptionFileCache::new(),
            unsafe_cache: Arc::new(UnsafeCache::new()),
        }
    }

    pub fn clear_cache(&self) {
        self.description_cache.clear();
        self.unsafe_cache.clear();
    }

    /// Resolves `request` from `context_dir`, without trace collection.
    pub async fn resolve(
        &self,
        context_dir: &Path,
        request: &str,
    ) -> Result<ResolveResult, ResolveError> {
        let mut ctx = ResolveContext::default();
        self.resolve_with_context(context_dir, request, &mut ctx).await
    }

    /// Resolves `request` from `context_dir`, threading caller-supplied
    /// diagnostics (trace log, file/missing-dependency sinks) through the
    /// whole dispatch.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn resolve_with_context(
        &self,
        context_dir: &Path,
        request: &str,
        ctx: &mut ResolveContext,
    ) -> Result<ResolveResult, ResolveError> {
        if request.is_empty() {
            return Err(ResolveError::BadRequest("request must not be empty".to_string()));
        }
        let req = ResolveRequest::new(context_dir.to_path_buf(), request.to_string());
        match self.do_resolve("resolve", req, "resolve".to_string(), ctx).await {
            StepOutcome::Done(resolved) => Ok(ResolveResult::Resource(Resource::from_request(&resolved))),
            StepOutcome::Ignored => Ok(ResolveResult::Ignored),
            StepOutcome::Err(err) => Err(err),
            StepOutcome::Yield(_) => Err(ResolveError::NoResolution {
                request: request.to_string(),
                context: context_dir.to_path_buf(),
                trace: ctx.take_trace(),
            }),
        }
    }

    /// Forks into `hook_name` with `request`, the core of §4.4. Every step
    /// that wants to re-enter the pipeline (rather than answering directly)
    /// goes through here.
    #[tracing::instrument(skip(self, ctx), fields(hook = hook_name))]
    pub async fn do_resolve(
        &self,
        hook_name: &'static str,
        request: ResolveRequest,
        message: String,
        ctx: &mut ResolveContext,
    ) -> StepOutcome {
        let fingerprint = request.fingerprint(true);
        if !ctx.enter(hook_name, fingerprint) {
            return StepOutcome::Err(ResolveError::Recursion {
                hook: hook_name,
                request: request.request.clone(),
            });
        }
        ctx.trace(message);
        let outcome = match self.hooks.get(hook_name) {
            Some(hook) => hook.call(self, request, ctx).await,
            None => StepOutcome::Yield(request),
        };
        ctx.leave();
        outcome
    }
}
