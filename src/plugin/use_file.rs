use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, hooks, request::ResolveRequest, resolver::Resolver};

/// `resolve.mainFiles` (§4.3 `UseFilePlugin`): one tap per configured
/// directory-index name (`"index"` by default), forking into
/// `undescribed-raw-file` with that name as the request.
pub struct UseFilePlugin {
    pub name: String,
}

impl UseFilePlugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Step for UseFilePlugin {
    fn name(&self) -> &'static str {
        "UseFilePlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        let forked = request.clone().with_target(format!("./{}", self.name));
        let outcome = resolver
            .do_resolve(hooks::UNDESCRIBED_RAW_FILE, forked, format!("main file '{}'", self.name), ctx)
            .await;
        if outcome.is_pass() {
            StepOutcome::Yield(request)
        } else {
            outcome
        }
    }
}
