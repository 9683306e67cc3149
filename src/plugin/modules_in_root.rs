use std::path::PathBuf;

use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, hooks, request::ResolveRequest, resolver::Resolver};

/// One tap per absolute `resolve.modules` entry: forks straight to `module`
/// with `path` replaced by the configured root (§4.3 `ModulesInRootPlugin`).
pub struct ModulesInRootPlugin {
    pub root: PathBuf,
}

impl ModulesInRootPlugin {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Step for ModulesInRootPlugin {
    fn name(&self) -> &'static str {
        "ModulesInRootPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        let forked = request.clone().with_path(self.root.clone());
        let outcome = resolver
            .do_resolve(hooks::MODULE, forked, format!("modules root '{}'", self.root.display()), ctx)
            .await;
        if outcome.is_pass() {
            StepOutcome::Yield(request)
        } else {
            outcome
        }
    }
}
