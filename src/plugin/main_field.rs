use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, hooks, request::ResolveRequest, resolver::Resolver};

/// `resolve.mainFields` (§4.3 `MainFieldPlugin`). Only applies at the exact
/// package boundary (`path == description_file_root`); a main field
/// pointing at `.`/`./` is skipped (it would just point back at itself).
pub struct MainFieldPlugin;

#[async_trait]
impl Step for MainFieldPlugin {
    fn name(&self) -> &'static str {
        "MainFieldPlugin"
    }

    async fn apply(&self, resolver: &Resolver, mut request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        let Some(pkg) = request.description_file_data.clone() else {
            return StepOutcome::Yield(request);
        };
        if pkg.directory != request.path {
            return StepOutcome::Yield(request);
        }
        let marker = format!("main-field:{}", pkg.directory.display());
        if !request.context.mark(marker) {
            return StepOutcome::Yield(request);
        }
        for entry in &resolver.options.main_fields {
            let Some(value) = pkg.field_path(&entry.path) else { continue };
            let Some(main) = value.as_str() else { continue };
            if main == "." || main == "./" {
                break;
            }
            let target = if main.starts_with("./") || entry.force_relative {
                main.to_string()
            } else {
                format!("./{main}")
            };
            let forked = request.clone().with_target(target.clone());
            let outcome = resolver
                .do_resolve(hooks::RESOLVE_IN_EXISTING_DIRECTORY, forked, format!("main field -> '{target}'"), ctx)
                .await;
            if !outcome.is_pass() {
                return outcome;
            }
        }
        StepOutcome::Yield(request)
    }
}
