use async_trait::async_trait;

use crate::{
    context::ResolveContext,
    error::ResolveError,
    hook::{Step, StepOutcome},
    hooks,
    path_kind::PathKind,
    remap::{remap, RemapResult},
    request::ResolveRequest,
    resolver::Resolver,
};

/// `resolve.importsFields` (§3.1/§4.3.1 `ImportsFieldPlugin`): rewrites a
/// `#specifier` internal import using the nearest description file's
/// `imports` map, then restarts the whole pipeline on the rewritten target.
/// Only acts on [`PathKind::Internal`] requests; everything else passes
/// straight through.
pub struct ImportsFieldPlugin;

#[async_trait]
impl Step for ImportsFieldPlugin {
    fn name(&self) -> &'static str {
        "ImportsFieldPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        if request.kind != PathKind::Internal {
            return StepOutcome::Yield(request);
        }
        let Some(pkg) = request.description_file_data.clone() else {
            return StepOutcome::Yield(request);
        };
        let conditions = &resolver.options.condition_names;
        for field_path in &resolver.options.imports_fields {
            let Some(field) = pkg.field_path(field_path) else { continue };
            match remap(field, &request.request, conditions) {
                RemapResult::NotFound => continue,
                RemapResult::Ignored => {
                    return StepOutcome::Err(ResolveError::AliasedToFalse {
                        request: request.request.clone(),
                        context: pkg.directory.display().to_string(),
                    })
                }
                RemapResult::Target(target) => {
                    let forked = request.clone().with_path(pkg.directory.clone()).with_target(target.clone());
                    return resolver
                        .do_resolve(hooks::RESOLVE, forked, format!("imports field -> '{target}'"), ctx)
                        .await;
                }
            }
        }
        StepOutcome::Yield(request)
    }
}
