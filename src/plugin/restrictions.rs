use async_trait::async_trait;

use crate::{context::ResolveContext, error::ResolveError, hook::{Step, StepOutcome}, options::Restriction, request::ResolveRequest, resolver::Resolver};

/// `resolve.restrictions` (§3.1/§4.3.1 `RestrictionsPlugin`): the final
/// resolved path must match at least one configured restriction, if any are
/// configured at all. A violation is a hard error rather than a reason to
/// keep searching, since by the time this runs every other candidate has
/// already been exhausted along this branch.
pub struct RestrictionsPlugin;

#[async_trait]
impl Step for RestrictionsPlugin {
    fn name(&self) -> &'static str {
        "RestrictionsPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, _ctx: &mut ResolveContext) -> StepOutcome {
        if resolver.options.restrictions.is_empty() {
            return StepOutcome::Yield(request);
        }
        let path = request.resolved_path();
        let matches = resolver.options.restrictions.iter().any(|r| match r {
            Restriction::Path(prefix) => path.starts_with(prefix),
            Restriction::Pattern(re) => re.is_match(&path.to_string_lossy()),
        });
        if matches {
            StepOutcome::Yield(request)
        } else {
            StepOutcome::Err(ResolveError::BadRequest(format!(
                "'{}' does not match any configured restriction",
                path.display()
            )))
        }
    }
}
