use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, request::ResolveRequest, resolver::Resolver};

/// The terminal tap on `resolved`: nothing left to check, this is the
/// answer.
pub struct ResultPlugin;

#[async_trait]
impl Step for ResultPlugin {
    fn name(&self) -> &'static str {
        "ResultPlugin"
    }

    async fn apply(&self, _resolver: &Resolver, request: ResolveRequest, _ctx: &mut ResolveContext) -> StepOutcome {
        StepOutcome::Done(request)
    }
}
