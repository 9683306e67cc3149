use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, request::ResolveRequest, resolver::Resolver};

/// An unconditional fork into `target`, request untouched. Used wherever the
/// graph draws a plain arrow between two hooks with no gating logic of its
/// own (e.g. `resolve` into `new-resolve` when the unsafe cache is off).
pub struct NextPlugin {
    pub target: &'static str,
    pub label: &'static str,
}

impl NextPlugin {
    pub fn new(target: &'static str, label: &'static str) -> Self {
        Self { target, label }
    }
}

#[async_trait]
impl Step for NextPlugin {
    fn name(&self) -> &'static str {
        "NextPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        resolver.do_resolve(self.target, request, self.label.to_string(), ctx).await
    }
}

/// Same as [`NextPlugin`] but named for the "try without an extension" /
/// "try as a directory" arrows, which are semantically forks-of-last-resort
/// rather than the graph's main path.
pub type TryNextPlugin = NextPlugin;
