use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, hooks, request::ResolveRequest, resolver::Resolver};

/// `resolve.extensions` (§4.3 `AppendPlugin`): one tap per configured
/// extension, appended to `request.request` and forked to `file`. Yields
/// without forking if the request already ends with this extension, so the
/// same suffix is never tried twice.
pub struct AppendPlugin {
    pub extension: String,
}

impl AppendPlugin {
    pub fn new(extension: impl Into<String>) -> Self {
        Self { extension: extension.into() }
    }
}

#[async_trait]
impl Step for AppendPlugin {
    fn name(&self) -> &'static str {
        "AppendPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        if self.extension.is_empty() || request.request.ends_with(&self.extension) {
            return StepOutcome::Yield(request);
        }
        let appended = format!("{}{}", request.request, self.extension);
        let forked = request.clone().with_target(appended.clone());
        let outcome = resolver
            .do_resolve(hooks::FILE, forked, format!("appended '{}'", self.extension), ctx)
            .await;
        if outcome.is_pass() {
            StepOutcome::Yield(request)
        } else {
            outcome
        }
    }
}
