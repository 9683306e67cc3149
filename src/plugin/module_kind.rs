use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, hooks, request::ResolveRequest, resolver::Resolver};

/// Forks a bare-module request to `raw-module`. Yields untouched for
/// relative/absolute requests, letting [`super::join_request::JoinRequestPlugin`]
/// handle those instead (§4.3 `ModuleKindPlugin`).
///
/// Marks the request `"raw-module"` rather than literally clearing
/// `request.module` so [`super::exports_field::ExportsFieldPlugin`] can
/// still tell, once it reaches the package directory, that this lookup
/// started life as a bare-module request.
pub struct ModuleKindPlugin;

#[async_trait]
impl Step for ModuleKindPlugin {
    fn name(&self) -> &'static str {
        "ModuleKindPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        if !request.module {
            return StepOutcome::Yield(request);
        }
        let mut next = request;
        next.context.mark("raw-module");
        next.module = false;
        resolver
            .do_resolve(hooks::RAW_MODULE, next, "bare module request".to_string(), ctx)
            .await
    }
}
