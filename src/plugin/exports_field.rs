use async_trait::async_trait;

use crate::{
    context::ResolveContext,
    error::ResolveError,
    hook::{Step, StepOutcome},
    remap::{remap, RemapResult},
    request::ResolveRequest,
    resolver::Resolver,
};

/// `resolve.exportsFields` (§3.1/§4.3.1 `ExportsFieldPlugin`). Tapped right
/// after a package directory is described on `resolve-in-directory`
/// (mutate-in-place, not a fork): if the owning package declares an
/// `exports` map, the remaining subpath is rewritten through it before
/// file/directory existence is ever checked.
///
/// Only fires for requests that arrived here via a bare-module lookup
/// (marked `"raw-module"` by [`super::module_kind::ModuleKindPlugin`]) and
/// exactly at the package boundary. A package's own `exports` field never
/// applies to paths reached some other way.
///
/// An unmatched subpath is treated as "no exports field opinion" and falls
/// through to ordinary file resolution rather than a hard failure, keeping
/// this step purely additive over legacy (exports-less) packages.
pub struct ExportsFieldPlugin;

#[async_trait]
impl Step for ExportsFieldPlugin {
    fn name(&self) -> &'static str {
        "ExportsFieldPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, _ctx: &mut ResolveContext) -> StepOutcome {
        if !request.context.has("raw-module") {
            return StepOutcome::Yield(request);
        }
        let at_package_root = request.description_file_root.as_deref() == Some(request.path.as_path());
        let Some(pkg) = (at_package_root.then(|| request.description_file_data.clone()).flatten()) else {
            return StepOutcome::Yield(request);
        };
        let subpath = if request.request.is_empty() { "." } else { &request.request };
        let conditions = &resolver.options.condition_names;
        for field_path in &resolver.options.exports_fields {
            let Some(field) = pkg.field_path(field_path) else { continue };
            return match remap(field, subpath, conditions) {
                RemapResult::NotFound => continue,
                RemapResult::Ignored => StepOutcome::Err(ResolveError::AliasedToFalse {
                    request: request.request.clone(),
                    context: pkg.directory.display().to_string(),
                }),
                RemapResult::Target(target) => {
                    let mut next = request.clone();
                    next.context.mark("exports-field-rewritten");
                    StepOutcome::Yield(next.with_target(target))
                }
            };
        }
        StepOutcome::Yield(request)
    }
}
