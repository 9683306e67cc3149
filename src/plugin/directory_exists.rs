use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, request::ResolveRequest, resolver::Resolver};

/// Forks into `target` iff `request.resolved_path()` exists and is a
/// directory; otherwise yields untouched (§4.3 `DirectoryExistsPlugin`).
pub struct DirectoryExistsPlugin {
    pub target: &'static str,
}

impl DirectoryExistsPlugin {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

#[async_trait]
impl Step for DirectoryExistsPlugin {
    fn name(&self) -> &'static str {
        "DirectoryExistsPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        let path = request.resolved_path();
        match resolver.options.file_system.stat(&path).await {
            Ok(meta) if meta.is_dir() => {
                resolver
                    .do_resolve(self.target, request, format!("directory exists: {}", path.display()), ctx)
                    .await
            }
            _ => StepOutcome::Yield(request),
        }
    }
}
