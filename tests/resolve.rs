use std::{path::PathBuf, sync::Arc};

use hookrover::{fs::MemoryFileSystem, ResolveResult, Resolver, ResolverOptions};

fn resolver_with(fs: &Arc<MemoryFileSystem>) -> Resolver {
    Resolver::new(ResolverOptions::new(fs.clone()))
}

fn resolved_path(result: ResolveResult) -> PathBuf {
    match result {
        ResolveResult::Resource(resource) => resource.path,
        ResolveResult::Ignored => panic!("expected a resolution, got Ignored"),
    }
}

#[tokio::test]
async fn extensions_tried_in_configured_order() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_file("/project/src/foo.json", "{}");
    fs.add_file("/project/src/foo.js", "module.exports = 1;");
    let resolver = resolver_with(&fs);

    let result = resolver.resolve(&PathBuf::from("/project/src"), "./foo").await.unwrap();
    assert_eq!(resolved_path(result), PathBuf::from("/project/src/foo.js"));
}

#[tokio::test]
async fn directory_resolves_via_main_field_then_index() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_dir("/project/pkg");
    fs.add_file("/project/pkg/package.json", r#"{"main": "./lib/entry.js"}"#);
    fs.add_file("/project/pkg/lib/entry.js", "module.exports = 1;");
    let resolver = resolver_with(&fs);

    let result = resolver.resolve(&PathBuf::from("/project"), "./pkg").await.unwrap();
    assert_eq!(resolved_path(result), PathBuf::from("/project/pkg/lib/entry.js"));
}

#[tokio::test]
async fn directory_without_main_field_falls_back_to_index() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_dir("/project/pkg");
    fs.add_file("/project/pkg/index.js", "module.exports = 1;");
    let resolver = resolver_with(&fs);

    let result = resolver.resolve(&PathBuf::from("/project"), "./pkg").await.unwrap();
    assert_eq!(resolved_path(result), PathBuf::from("/project/pkg/index.js"));
}

#[tokio::test]
async fn single_file_beats_directory_of_the_same_name() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_file("/project/src/thing.js", "module.exports = 1;");
    fs.add_dir("/project/src/thing");
    fs.add_file("/project/src/thing/index.js", "module.exports = 2;");
    let resolver = resolver_with(&fs);

    let result = resolver.resolve(&PathBuf::from("/project/src"), "./thing").await.unwrap();
    assert_eq!(resolved_path(result), PathBuf::from("/project/src/thing.js"));
}

#[tokio::test]
async fn trailing_slash_forces_directory_resolution() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_file("/project/src/thing.js", "module.exports = 1;");
    fs.add_dir("/project/src/thing");
    fs.add_file("/project/src/thing/index.js", "module.exports = 2;");
    let resolver = resolver_with(&fs);

    let result = resolver.resolve(&PathBuf::from("/project/src"), "./thing/").await.unwrap();
    assert_eq!(resolved_path(result), PathBuf::from("/project/src/thing/index.js"));
}

#[tokio::test]
async fn trailing_slash_on_a_plain_file_is_an_error() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_file("/project/src/thing.js", "module.exports = 1;");
    let resolver = resolver_with(&fs);

    let err = resolver.resolve(&PathBuf::from("/project/src"), "./thing/").await.unwrap_err();
    assert!(matches!(err, hookrover::ResolveError::NoResolution { .. }));
}

#[tokio::test]
async fn bare_module_resolves_through_node_modules() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_file("/project/node_modules/left-pad/index.js", "module.exports = 1;");
    let resolver = resolver_with(&fs);

    let result = resolver.resolve(&PathBuf::from("/project/src/nested"), "left-pad").await.unwrap();
    assert_eq!(resolved_path(result), PathBuf::from("/project/node_modules/left-pad/index.js"));
}

#[tokio::test]
async fn closer_node_modules_shadows_further_one() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_file("/project/node_modules/left-pad/index.js", "module.exports = 1;");
    fs.add_file("/project/src/node_modules/left-pad/index.js", "module.exports = 2;");
    let resolver = resolver_with(&fs);

    let result = resolver.resolve(&PathBuf::from("/project/src"), "left-pad").await.unwrap();
    assert_eq!(resolved_path(result), PathBuf::from("/project/src/node_modules/left-pad/index.js"));
}

#[tokio::test]
async fn scoped_module_subpath_resolves() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_file("/project/node_modules/@scope/pkg/lib/util.js", "module.exports = 1;");
    let resolver = resolver_with(&fs);

    let result = resolver.resolve(&PathBuf::from("/project"), "@scope/pkg/lib/util").await.unwrap();
    assert_eq!(resolved_path(result), PathBuf::from("/project/node_modules/@scope/pkg/lib/util.js"));
}

#[tokio::test]
async fn unresolvable_request_surfaces_a_trace() {
    let fs = Arc::new(MemoryFileSystem::new());
    let resolver = resolver_with(&fs);
    let mut ctx = hookrover::ResolveContext::default().with_trace();

    let err = resolver
        .resolve_with_context(&PathBuf::from("/project"), "./missing", &mut ctx)
        .await
        .unwrap_err();
    match err {
        hookrover::ResolveError::NoResolution { trace, .. } => assert!(!trace.is_empty()),
        other => panic!("expected NoResolution, got {other:?}"),
    }
}
