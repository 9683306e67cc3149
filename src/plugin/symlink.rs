use async_trait::async_trait;

use crate::{context::ResolveContext, fs, hook::{Step, StepOutcome}, hooks, request::ResolveRequest, resolver::Resolver};

/// `resolve.symlinks` (§4.3 `SymlinkPlugin`): canonicalizes the resolved
/// file path, re-entering `existing-file` if it moved (so a symlink chain
/// resolves all the way through) and yielding unchanged once it's stable.
pub struct SymlinkPlugin;

#[async_trait]
impl Step for SymlinkPlugin {
    fn name(&self) -> &'static str {
        "SymlinkPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        if !resolver.options.symlinks {
            return StepOutcome::Yield(request);
        }
        let current = request.resolved_path();
        let canonical = match fs::canonicalize(resolver.options.file_system.as_ref(), &current).await {
            Ok(p) => p,
            Err(err) => return StepOutcome::Err(err.into()),
        };
        if canonical == current {
            return StepOutcome::Yield(request);
        }
        let next = request.with_path(canonical).with_target("");
        resolver.do_resolve(hooks::EXISTING_FILE, next, "followed symlink".to_string(), ctx).await
    }
}
