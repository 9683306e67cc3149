use async_trait::async_trait;

use crate::{
    context::ResolveContext,
    hook::{Step, StepOutcome},
    hooks,
    options::AliasValue,
    request::ResolveRequest,
    resolver::Resolver,
};

/// `resolve.alias` (§4.3 `AliasPlugin`). The first configured entry whose
/// name matches `request.request` (exactly, or as a `name/...` prefix
/// unless the entry ends in `$`) wins; its targets are tried in order and
/// the whole pipeline restarts from `resolve` for each.
pub struct AliasPlugin;

#[async_trait]
impl Step for AliasPlugin {
    fn name(&self) -> &'static str {
        "AliasPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        for entry in &resolver.options.alias {
            let Some(suffix) = alias_suffix(&entry.name, entry.only_module, &request.request) else {
                continue;
            };
            return match &entry.alias {
                AliasValue::Ignore => StepOutcome::Ignored,
                AliasValue::Targets(targets) => {
                    for target in targets {
                        let rewritten = format!("{target}{suffix}");
                        if rewritten == request.request {
                            continue;
                        }
                        let forked = request.clone().with_target(rewritten);
                        let outcome = resolver
                            .do_resolve(
                                hooks::RESOLVE,
                                forked,
                                format!("alias '{}' -> '{target}'", entry.name),
                                ctx,
                            )
                            .await;
                        if !outcome.is_pass() {
                            return outcome;
                        }
                    }
                    StepOutcome::Yield(request)
                }
            };
        }
        StepOutcome::Yield(request)
    }
}

fn alias_suffix(name: &str, only_module: bool, request: &str) -> Option<String> {
    if request == name {
        return Some(String::new());
    }
    if only_module {
        return None;
    }
    let prefix = format!("{name}/");
    request.strip_prefix(&prefix).map(|rest| format!("/{rest}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_prefix_matches() {
        assert_eq!(alias_suffix("a", false, "a"), Some(String::new()));
        assert_eq!(alias_suffix("a", false, "a/b"), Some("/b".to_string()));
        assert_eq!(alias_suffix("a", false, "ab"), None);
        assert_eq!(alias_suffix("a", true, "a/b"), None);
    }
}
