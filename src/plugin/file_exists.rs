use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, hooks, request::ResolveRequest, resolver::Resolver};

/// Forks into `existing-file` iff `request.resolved_path()` exists and is a
/// file; otherwise yields untouched (§4.3 `FileExistsPlugin`).
pub struct FileExistsPlugin;

#[async_trait]
impl Step for FileExistsPlugin {
    fn name(&self) -> &'static str {
        "FileExistsPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        let path = request.resolved_path();
        match resolver.options.file_system.stat(&path).await {
            Ok(meta) if meta.is_file() => {
                resolver
                    .do_resolve(hooks::EXISTING_FILE, request, format!("file exists: {}", path.display()), ctx)
                    .await
            }
            _ => StepOutcome::Yield(request),
        }
    }
}
