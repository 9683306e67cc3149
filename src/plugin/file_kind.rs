use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, request::ResolveRequest, resolver::Resolver};

/// Forks into `target` unless the request was written with a trailing
/// slash (directory semantics forced, §invariant "requests ending in `/`
/// never terminate on a file"). Otherwise yields, letting a sibling tap try
/// the directory branch instead (§4.3, the "single-file-module branch").
pub struct FileKindPlugin {
    pub target: &'static str,
}

impl FileKindPlugin {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

#[async_trait]
impl Step for FileKindPlugin {
    fn name(&self) -> &'static str {
        "FileKindPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        if request.directory {
            return StepOutcome::Yield(request);
        }
        resolver.do_resolve(self.target, request, "as file".to_string(), ctx).await
    }
}
