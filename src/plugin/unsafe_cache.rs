use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, hooks, request::ResolveRequest, resolver::Resolver};

/// Consults [`crate::cache::UnsafeCache`] before the rest of the pipeline
/// runs at all. A hit skips straight to `resolved`; a miss fills in the
/// cache once the nested resolve settles, gated by `cache_predicate`.
pub struct UnsafeCachePlugin;

#[async_trait]
impl Step for UnsafeCachePlugin {
    fn name(&self) -> &'static str {
        "UnsafeCachePlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        let key = request.fingerprint(resolver.options.cache_with_context);
        if let Some(cached) = resolver.unsafe_cache.get(&key) {
            ctx.trace(format!("unsafe cache hit for '{}{}'", cached.path.display(), cached.request));
            return resolver
                .do_resolve(hooks::RESOLVED, cached, "unsafe cache hit".to_string(), ctx)
                .await;
        }
        let outcome = resolver
            .do_resolve(hooks::NEW_RESOLVE, request, "unsafe cache miss".to_string(), ctx)
            .await;
        if let StepOutcome::Done(resolved) = &outcome {
            if resolver.options.cache_predicate.admits(resolved) {
                resolver.unsafe_cache.insert(key, resolved.clone());
            }
        }
        outcome
    }
}
