use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, hooks, request::ResolveRequest, resolver::Resolver};

/// Combines `path` and `request` into a single new `path`, clearing
/// `request` (§4.3 `JoinRequestPlugin`). Used wherever a relative or
/// absolute request needs to become a plain directory context before
/// description-file lookup.
pub struct JoinRequestPlugin {
    pub target: &'static str,
}

impl JoinRequestPlugin {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

#[async_trait]
impl Step for JoinRequestPlugin {
    fn name(&self) -> &'static str {
        "JoinRequestPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        let joined = request.resolved_path();
        let directory = request.directory;
        let mut next = request.with_path(joined).with_target("");
        // `with_target("")` recomputes `directory` from the now-empty
        // request, losing the trailing-slash that forced it; restore it
        // explicitly so a `./foo/` request can't settle on the file branch.
        next.directory = directory;
        resolver.do_resolve(self.target, next, "joined request into path".to_string(), ctx).await
    }
}

/// Like [`JoinRequestPlugin`] but keeps one leading path segment of
/// `request` (the module name) in `request`, so the remainder survives as a
/// relative subpath within the package (§4.3 `JoinRequestPartPlugin`).
pub struct JoinRequestPartPlugin;

#[async_trait]
impl Step for JoinRequestPartPlugin {
    fn name(&self) -> &'static str {
        "JoinRequestPartPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        let (name, remainder) = split_module_request(&request.request);
        let joined = crate::normalize::normalize(&request.path.join(&name));
        let next = request.with_path(joined).with_target(remainder);
        resolver
            .do_resolve(hooks::RESOLVE_IN_DIRECTORY, next, format!("module '{name}'"), ctx)
            .await
    }
}

/// Splits a bare module request into its package name (honoring `@scope`
/// names) and the remainder, expressed as a `./...` relative request.
pub fn split_module_request(request: &str) -> (String, String) {
    let has_scope = request.starts_with('@');
    let slashes: Vec<usize> = request.char_indices().filter(|&(_, c)| c == '/').map(|(i, _)| i).collect();
    let split_at = if has_scope { slashes.get(1) } else { slashes.first() };
    match split_at {
        Some(&idx) => {
            let name = request[..idx].to_string();
            let rest = &request[idx..];
            let remainder = if rest == "/" { "./".to_string() } else { format!(".{rest}") };
            (name, remainder)
        }
        None => (request.to_string(), ".".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_scoped_and_plain_names() {
        assert_eq!(split_module_request("a"), ("a".to_string(), ".".to_string()));
        assert_eq!(split_module_request("a/b"), ("a".to_string(), "./b".to_string()));
        assert_eq!(split_module_request("@a/b"), ("@a/b".to_string(), ".".to_string()));
        assert_eq!(split_module_request("@a/b/c"), ("@a/b".to_string(), "./c".to_string()));
        assert_eq!(split_module_request("a/"), ("a".to_string(), "./".to_string()));
    }
}
