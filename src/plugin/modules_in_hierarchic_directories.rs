use std::path::Path;

use async_trait::async_trait;

use crate::{context::ResolveContext, hook::{Step, StepOutcome}, hooks, request::ResolveRequest, resolver::Resolver};

/// One tap per bare `resolve.modules` entry (e.g. `"node_modules"`): walks
/// `request.path` and every ancestor, forking into `module` for each
/// `ancestor/<name>` candidate, innermost first, so a closer `node_modules`
/// always shadows one further up the tree (§4.3
/// `ModulesInHierachicDirectoriesPlugin`).
pub struct ModulesInHierarchicDirectoriesPlugin {
    pub name: String,
}

impl ModulesInHierarchicDirectoriesPlugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Step for ModulesInHierarchicDirectoriesPlugin {
    fn name(&self) -> &'static str {
        "ModulesInHierachicDirectoriesPlugin"
    }

    async fn apply(&self, resolver: &Resolver, request: ResolveRequest, ctx: &mut ResolveContext) -> StepOutcome {
        let mut dir = Some(request.path.clone());
        while let Some(d) = dir {
            let skip = d.file_name().map(|n| n.to_string_lossy() == self.name).unwrap_or(false);
            if !skip {
                let candidate = d.join(&self.name);
                let forked = request.clone().with_path(candidate);
                let outcome = resolver
                    .do_resolve(hooks::MODULE, forked, format!("modules in '{}'", d.display()), ctx)
                    .await;
                if !outcome.is_pass() {
                    return outcome;
                }
            }
            dir = d.parent().map(Path::to_path_buf);
        }
        StepOutcome::Yield(request)
    }
}
