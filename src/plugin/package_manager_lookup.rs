use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, hooks, request::ResolveRequest, resolver::Resolver};

/// Gives `resolve.pnp_api` first refusal on a bare-module request before
/// falling back to ordinary `node_modules` walking.
pub struct PackageManagerLookupPlugin;

#[async_trait]
impl Step for PackageManagerLookupPlugin {
    fn name(&self) -> &'static str {
        "PackageManagerLookupPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        let Some(pnp) = &resolver.options.pnp_api else {
            return StepOutcome::Yield(request);
        };
        match pnp.resolve(&request.path, &request.request).await {
            Ok(Some(resolved)) => {
                let next = request.clone().with_path(resolved).with_target("");
                resolver
                    .do_resolve(hooks::RELATIVE, next, "package manager lookup".to_string(), ctx)
                    .await
            }
            Ok(None) => StepOutcome::Yield(request),
            Err(err) => StepOutcome::Err(err),
        }
    }
}
