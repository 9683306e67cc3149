use async_trait::async_trait;
use serde_json::Value;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, hooks, request::ResolveRequest, resolver::Resolver};

/// `resolve.aliasFields` (the `browser` field, §4.3 `AliasFieldPlugin`).
/// Keys are either a bare module name (matched against the whole request)
/// or a `./relative/path` within the owning package, matched against
/// `request.relative_path`.
pub struct AliasFieldPlugin;

#[async_trait]
impl Step for AliasFieldPlugin {
    fn name(&self) -> &'static str {
        "AliasFieldPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        let Some(pkg) = request.description_file_data.clone() else {
            return StepOutcome::Yield(request);
        };
        for field_path in &resolver.options.alias_fields {
            let Some(Value::Object(map)) = pkg.field_path(field_path) else {
                continue;
            };
            for key in candidate_keys(&request) {
                let Some(value) = map.get(&key) else { continue };
                return match value {
                    Value::Bool(false) => StepOutcome::Ignored,
                    Value::String(target) => {
                        let forked = request
                            .clone()
                            .with_path(pkg.directory.clone())
                            .with_target(target.clone());
                        resolver
                            .do_resolve(hooks::RESOLVE, forked, format!("alias field '{key}' -> '{target}'"), ctx)
                            .await
                    }
                    _ => continue,
                };
            }
        }
        StepOutcome::Yield(request)
    }
}

fn candidate_keys(request: &ResolveRequest) -> Vec<String> {
    let mut keys = vec![request.request.clone()];
    if let Some(rel) = &request.relative_path {
        let posix = rel.to_string_lossy().replace('\\', "/");
        keys.push(format!("./{posix}"));
    }
    keys
}
