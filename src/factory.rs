//! Assembles a [`Resolver`] from [`ResolverOptions`] by tapping every step
//! from [`crate::plugin`] onto the named hooks of §4.2, in the order the
//! dataflow graph requires. This is the one place in the crate that knows
//! the full shape of the pipeline; everything else only knows its own
//! stage.

use std::sync::Arc;

use crate::{
    hook::{Hook, HookRegistry, Step},
    hooks,
    options::{ModuleRoot, ResolverOptions},
    plugin::{
        AliasFieldPlugin, AliasPlugin, AppendPlugin, DescriptionFilePlugin, DirectoryExistsPlugin,
        ExportsFieldPlugin, FileExistsPlugin, FileKindPlugin, ImportsFieldPlugin,
        JoinRequestPartPlugin, JoinRequestPlugin, MainFieldPlugin, ModuleKindPlugin,
        ModulesInHierarchicDirectoriesPlugin, ModulesInRootPlugin, NextPlugin,
        PackageManagerLookupPlugin, ParsePlugin, RestrictionsPlugin, ResultPlugin, SymlinkPlugin,
        TryNextPlugin, UnsafeCachePlugin, UseFilePlugin,
    },
    resolver::Resolver,
};

pub struct ResolverFactory {
    options: ResolverOptions,
}

impl ResolverFactory {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn build(self) -> Resolver {
        let mut options = self.options;
        options.file_system = Arc::new(crate::fs::CachedFileSystem::new(AsArc(options.file_system.clone())));
        let hooks = Self::assemble(&options);
        Resolver::from_parts(options, hooks)
    }

    fn assemble(options: &ResolverOptions) -> HookRegistry {
        let mut registry = HookRegistry::new();

        tap(&mut registry, hooks::RESOLVE, {
            let mut taps: Vec<Arc<dyn Step>> = Vec::new();
            if options.unsafe_cache {
                taps.push(Arc::new(UnsafeCachePlugin));
            } else {
                taps.push(Arc::new(NextPlugin::new(hooks::NEW_RESOLVE, "resolve")));
            }
            taps
        });

        tap(&mut registry, hooks::NEW_RESOLVE, vec![Arc::new(ParsePlugin)]);

        tap(
            &mut registry,
            hooks::PARSED_RESOLVE,
            vec![Arc::new(DescriptionFilePlugin::forking(hooks::DESCRIBED_RESOLVE))],
        );

        tap(&mut registry, hooks::DESCRIBED_RESOLVE, {
            let mut taps: Vec<Arc<dyn Step>> = options.plugins.clone();
            taps.push(Arc::new(ImportsFieldPlugin));
            taps.push(Arc::new(AliasPlugin));
            taps.push(Arc::new(AliasFieldPlugin));
            taps.push(Arc::new(ModuleKindPlugin));
            taps.push(Arc::new(JoinRequestPlugin::new(hooks::RELATIVE)));
            taps
        });

        tap(&mut registry, hooks::RAW_MODULE, {
            let mut taps: Vec<Arc<dyn Step>> = vec![Arc::new(PackageManagerLookupPlugin)];
            for root in &options.modules {
                if let ModuleRoot::Absolute(path) = root {
                    taps.push(Arc::new(ModulesInRootPlugin::new(path.clone())));
                }
            }
            for root in &options.modules {
                if let ModuleRoot::Hierarchic(name) = root {
                    taps.push(Arc::new(ModulesInHierarchicDirectoriesPlugin::new(name.clone())));
                }
            }
            taps
        });

        tap(&mut registry, hooks::MODULE, vec![Arc::new(JoinRequestPartPlugin)]);

        tap(&mut registry, hooks::RESOLVE_IN_DIRECTORY, {
            vec![
                Arc::new(DescriptionFilePlugin::in_place()),
                Arc::new(ExportsFieldPlugin),
                Arc::new(FileKindPlugin::new(hooks::UNDESCRIBED_RAW_FILE)),
                Arc::new(DirectoryExistsPlugin::new(hooks::RESOLVE_IN_EXISTING_DIRECTORY)),
            ]
        });

        tap(
            &mut registry,
            hooks::RESOLVE_IN_EXISTING_DIRECTORY,
            vec![Arc::new(JoinRequestPlugin::new(hooks::RELATIVE))],
        );

        tap(
            &mut registry,
            hooks::RELATIVE,
            vec![Arc::new(DescriptionFilePlugin::forking(hooks::DESCRIBED_RELATIVE))],
        );

        tap(&mut registry, hooks::DESCRIBED_RELATIVE, {
            vec![
                Arc::new(FileKindPlugin::new(hooks::RAW_FILE)),
                Arc::new(TryNextPlugin::new(hooks::DIRECTORY, "as directory")),
            ]
        });

        tap(
            &mut registry,
            hooks::DIRECTORY,
            vec![Arc::new(DirectoryExistsPlugin::new(hooks::UNDESCRIBED_EXISTING_DIRECTORY))],
        );

        tap(&mut registry, hooks::UNDESCRIBED_EXISTING_DIRECTORY, {
            if options.resolve_to_context {
                vec![Arc::new(NextPlugin::new(hooks::RESOLVED, "resolve to context"))]
            } else {
                let mut taps: Vec<Arc<dyn Step>> =
                    vec![Arc::new(DescriptionFilePlugin::forking(hooks::EXISTING_DIRECTORY))];
                if !options.fully_specified {
                    taps.extend(main_file_taps(options));
                }
                taps
            }
        });

        tap(&mut registry, hooks::EXISTING_DIRECTORY, {
            let mut taps: Vec<Arc<dyn Step>> = vec![Arc::new(MainFieldPlugin)];
            if !options.fully_specified {
                taps.extend(main_file_taps(options));
            }
            taps
        });

        tap(
            &mut registry,
            hooks::UNDESCRIBED_RAW_FILE,
            vec![Arc::new(DescriptionFilePlugin::forking(hooks::RAW_FILE))],
        );

        tap(&mut registry, hooks::RAW_FILE, {
            let mut taps: Vec<Arc<dyn Step>> = Vec::new();
            if options.fully_specified {
                taps.push(Arc::new(TryNextPlugin::new(hooks::FILE, "fully specified")));
            } else {
                if !options.enforce_extension.resolve(&options.extensions) {
                    taps.push(Arc::new(TryNextPlugin::new(hooks::FILE, "no extension")));
                }
                for ext in &options.extensions {
                    taps.push(Arc::new(AppendPlugin::new(ext.clone())));
                }
            }
            taps
        });

        tap(&mut registry, hooks::FILE, {
            vec![Arc::new(AliasPlugin), Arc::new(AliasFieldPlugin), Arc::new(FileExistsPlugin)]
        });

        tap(&mut registry, hooks::EXISTING_FILE, {
            vec![Arc::new(SymlinkPlugin), Arc::new(NextPlugin::new(hooks::RESOLVED, "existing file"))]
        });

        tap(&mut registry, hooks::RESOLVED, vec![Arc::new(RestrictionsPlugin), Arc::new(ResultPlugin)]);

        registry
    }
}

fn main_file_taps(options: &ResolverOptions) -> Vec<Arc<dyn Step>> {
    options
        .main_files
        .iter()
        .map(|name| Arc::new(UseFilePlugin::new(name.clone())) as Arc<dyn Step>)
        .collect()
}

fn tap(registry: &mut HookRegistry, name: &'static str, taps: Vec<Arc<dyn Step>>) {
    let hook: &mut Hook = registry.ensure_hook(name);
    for step in taps {
        hook.tap(step);
    }
}

/// Lets `build()` re-wrap the caller-supplied `Arc<dyn FileSystem>` inside
/// `CachedFileSystem<F>`, which is generic over an owned `F: FileSystem`
/// rather than a trait object.
#[derive(Debug)]
struct AsArc(Arc<dyn crate::fs::FileSystem>);

#[async_trait::async_trait]
impl crate::fs::FileSystem for AsArc {
    async fn stat(&self, path: &std::path::Path) -> Result<crate::fs::Metadata, crate::fs::FsError> {
        self.0.stat(path).await
    }

    async fn read_dir(&self, path: &std::path::Path) -> Result<Vec<String>, crate::fs::FsError> {
        self.0.read_dir(path).await
    }

    async fn read_file(&self, path: &std::path::Path) -> Result<String, crate::fs::FsError> {
        self.0.read_file(path).await
    }

    async fn read_link(&self, path: &std::path::Path) -> Result<std::path::PathBuf, crate::fs::FsError> {
        self.0.read_link(path).await
    }
}
