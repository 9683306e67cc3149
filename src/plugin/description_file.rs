use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, request::ResolveRequest, resolver::Resolver};

/// Attaches the nearest ancestor description file to `request`, then either
/// forks into `target` (when this instance sits on a named graph edge, e.g.
/// `parsed-resolve` → `described-resolve`) or simply yields the attached
/// request back to the same hook (when it is an internal step used to make
/// description data available to a later tap on the same hook, as with the
/// exports-field lookup on `resolve-in-directory`).
///
/// Re-uses the already-attached data without re-walking when `request.path`
/// is exactly the directory that produced it, the common case of a step
/// immediately downstream re-entering the same directory.
pub struct DescriptionFilePlugin {
    pub target: Option<&'static str>,
}

impl DescriptionFilePlugin {
    pub fn forking(target: &'static str) -> Self {
        Self { target: Some(target) }
    }

    pub fn in_place() -> Self {
        Self { target: None }
    }
}

#[async_trait]
impl Step for DescriptionFilePlugin {
    fn name(&self) -> &'static str {
        "DescriptionFilePlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        let already_current = request
            .description_file_root
            .as_deref()
            .is_some_and(|root| root == request.path);
        let next = if already_current {
            request
        } else {
            let found = resolver
                .description_cache
                .load_ancestor(
                    resolver.options.file_system.as_ref(),
                    &resolver.options.description_files,
                    &request.path,
                )
                .await;
            match found {
                Ok(Some(pkg)) => {
                    let path = pkg.path.clone();
                    let dir = pkg.directory.clone();
                    request.with_description_file(path, dir, pkg)
                }
                Ok(None) => request,
                Err(err) => return StepOutcome::Err(err),
            }
        };
        match self.target {
            Some(target) => {
                resolver
                    .do_resolve(target, next, "attached description file".to_string(), ctx)
                    .await
            }
            None => StepOutcome::Yield(next),
        }
    }
}
