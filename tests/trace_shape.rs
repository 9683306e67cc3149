use std::{path::PathBuf, sync::Arc};

use hookrover::{
    fs::MemoryFileSystem,
    options::{AliasEntry, AliasValue},
    Resolver, ResolverOptions,
};

/// Eyeball test: prints the `#[tracing::instrument]` span tree for a resolve
/// that forks through alias rewriting and a couple of directory hops, so a
/// reviewer running `cargo test -- --nocapture` can sanity-check the
/// dispatch shape without reading the unsafe-cache fingerprint trace.
#[tokio::test]
async fn span_tree_for_an_aliased_resolve() {
    let _guard = tracing_span_tree::span_tree();

    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_file("/project/node_modules/real-pkg/index.js", "module.exports = 1;");
    let mut options = ResolverOptions::new(fs);
    options.alias = vec![AliasEntry::new(
        "virtual-pkg",
        AliasValue::Targets(vec!["real-pkg".to_string()]),
    )];
    let resolver = Resolver::new(options);

    let result = resolver.resolve(&PathBuf::from("/project"), "virtual-pkg").await;
    assert!(result.is_ok());
}
