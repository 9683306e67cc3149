use std::{fmt, path::PathBuf, sync::Arc};

use regex::Regex;
use serde::Deserialize;

use crate::{fs::FileSystem, hook::Step, pnp::PackageManagerResolver, request::ResolveRequest};

/// What an [`AliasEntry`] rewrites a matching request to.
#[derive(Debug, Clone)]
pub enum AliasValue {
    /// `alias: false`: the request is intentionally ignored.
    Ignore,
    /// One or more replacement prefixes, tried in order.
    Targets(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct AliasEntry {
    pub name: String,
    /// `true` when `name` ended in `$`: matches only the exact request.
    pub only_module: bool,
    pub alias: AliasValue,
}

impl AliasEntry {
    pub fn new(name: impl Into<String>, alias: AliasValue) -> Self {
        let name = name.into();
        if let Some(stripped) = name.strip_suffix('$') {
            Self {
                name: stripped.to_string(),
                only_module: true,
                alias,
            }
        } else {
            Self {
                only_module: false,
                name,
                alias,
            }
        }
    }
}

/// A `mainFields` entry: a plain field name, a nested path, or a
/// `{name, forceRelative}` record.
#[derive(Debug, Clone)]
pub struct MainFieldEntry {
    pub path: Vec<String>,
    pub force_relative: bool,
}

impl MainFieldEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            path: vec![name.into()],
            force_relative: false,
        }
    }

    pub fn nested(path: Vec<String>) -> Self {
        Self {
            path,
            force_relative: false,
        }
    }
}

/// A `modules` entry: either a bare directory name (hierarchic lookup) or
/// an absolute path (single-root lookup).
#[derive(Debug, Clone)]
pub enum ModuleRoot {
    Hierarchic(String),
    Absolute(PathBuf),
}

/// A `restrictions` entry.
#[derive(Clone)]
pub enum Restriction {
    Path(PathBuf),
    Pattern(Arc<Regex>),
}

impl fmt::Debug for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Restriction::Path(p) => write!(f, "Restriction::Path({p:?})"),
            Restriction::Pattern(r) => write!(f, "Restriction::Pattern({r})"),
        }
    }
}

/// `enforceExtension`'s three-way default (mirrors the teacher's
/// `EnforceExtension`: an explicit choice beats the derived default of
/// "enabled iff an empty string is among `extensions`").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnforceExtension {
    #[default]
    Auto,
    Enabled,
    Disabled,
}

impl EnforceExtension {
    pub fn resolve(self, extensions: &[String]) -> bool {
        match self {
            EnforceExtension::Enabled => true,
            EnforceExtension::Disabled => false,
            EnforceExtension::Auto => extensions.iter().any(|ext| ext.is_empty()),
        }
    }
}

/// Per-request filter admitting a resolution into the unsafe cache.
#[derive(Clone)]
pub struct CachePredicate(Arc<dyn Fn(&ResolveRequest) -> bool + Send + Sync>);

impl CachePredicate {
    pub fn new(f: impl Fn(&ResolveRequest) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn admits(&self, request: &ResolveRequest) -> bool {
        (self.0)(request)
    }
}

impl Default for CachePredicate {
    fn default() -> Self {
        Self::new(|_| true)
    }
}

impl fmt::Debug for CachePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CachePredicate(..)")
    }
}

/// The declarative configuration consumed by [`crate::factory::ResolverFactory`]
/// (§6). Plain-data fields mirror [`ResolverConfigFile`] one-to-one so a
/// config file and a builder agree on shape; `file_system`, `plugins`, and
/// `pnp_api` carry behavior and so are supplied programmatically.
#[derive(Clone)]
pub struct ResolverOptions {
    pub alias: Vec<AliasEntry>,
    pub alias_fields: Vec<Vec<String>>,
    pub cache_predicate: CachePredicate,
    pub cache_with_context: bool,
    pub description_files: Vec<String>,
    pub enforce_extension: EnforceExtension,
    pub extensions: Vec<String>,
    pub exports_fields: Vec<Vec<String>>,
    pub imports_fields: Vec<Vec<String>>,
    pub condition_names: Vec<String>,
    pub file_system: Arc<dyn FileSystem>,
    pub unsafe_cache: bool,
    pub symlinks: bool,
    pub modules: Vec<ModuleRoot>,
    pub main_fields: Vec<MainFieldEntry>,
    pub main_files: Vec<String>,
    pub restrictions: Vec<Restriction>,
    pub plugins: Vec<Arc<dyn Step>>,
    pub pnp_api: Option<Arc<dyn PackageManagerResolver>>,
    pub resolve_to_context: bool,
    pub fully_specified: bool,
}

impl fmt::Debug for ResolverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverOptions")
            .field("alias", &self.alias)
            .field("alias_fields", &self.alias_fields)
            .field("cache_with_context", &self.cache_with_context)
            .field("description_files", &self.description_files)
            .field("enforce_extension", &self.enforce_extension)
            .field("extensions", &self.extensions)
            .field("exports_fields", &self.exports_fields)
            .field("imports_fields", &self.imports_fields)
            .field("condition_names", &self.condition_names)
            .field("unsafe_cache", &self.unsafe_cache)
            .field("symlinks", &self.symlinks)
            .field("modules", &self.modules)
            .field("main_fields", &self.main_fields)
            .field("main_files", &self.main_files)
            .field("restrictions", &self.restrictions)
            .field("plugins", &self.plugins.len())
            .field("pnp_api", &self.pnp_api.is_some())
            .field("resolve_to_context", &self.resolve_to_context)
            .field("fully_specified", &self.fully_specified)
            .finish()
    }
}

impl ResolverOptions {
    /// The only field without a sensible default: every other option
    /// matches the table in SPEC_FULL.md §6.
    pub fn new(file_system: Arc<dyn FileSystem>) -> Self {
        Self {
            alias: Vec::new(),
            alias_fields: Vec::new(),
            cache_predicate: CachePredicate::default(),
            cache_with_context: true,
            description_files: vec!["package.json".to_string()],
            enforce_extension: EnforceExtension::Auto,
            extensions: vec![".js".to_string(), ".json".to_string(), ".node".to_string()],
            exports_fields: vec![vec!["exports".to_string()]],
            imports_fields: vec![vec!["imports".to_string()]],
            condition_names: vec!["node".to_string(), "require".to_string()],
            file_system,
            unsafe_cache: false,
            symlinks: true,
            modules: vec![ModuleRoot::Hierarchic("node_modules".to_string())],
            main_fields: vec![MainFieldEntry::named("main")],
            main_files: vec!["index".to_string()],
            restrictions: Vec::new(),
            plugins: Vec::new(),
            pnp_api: None,
            resolve_to_context: false,
            fully_specified: false,
        }
    }

    /// Applies the plain-data overrides from a deserialized config file.
    pub fn apply_config(&mut self, config: ResolverConfigFile) {
        if let Some(alias) = config.alias {
            self.alias = alias
                .into_iter()
                .map(|(name, targets)| {
                    let value = if targets.iter().any(Option::is_none) {
                        AliasValue::Ignore
                    } else {
                        AliasValue::Targets(targets.into_iter().flatten().collect())
                    };
                    AliasEntry::new(name, value)
                })
                .collect();
        }
        if let Some(v) = config.alias_fields {
            self.alias_fields = v.into_iter().map(|f| vec![f]).collect();
        }
        if let Some(v) = config.description_files {
            self.description_files = v;
        }
        if let Some(v) = config.extensions {
            self.extensions = v;
        }
        if let Some(v) = config.condition_names {
            self.condition_names = v;
        }
        if let Some(v) = config.unsafe_cache {
            self.unsafe_cache = v;
        }
        if let Some(v) = config.symlinks {
            self.symlinks = v;
        }
        if let Some(v) = config.modules {
            self.modules = v
                .into_iter()
                .map(|m| {
                    let path = PathBuf::from(&m);
                    if path.is_absolute() {
                        ModuleRoot::Absolute(path)
                    } else {
                        ModuleRoot::Hierarchic(m)
                    }
                })
                .collect();
        }
        if let Some(v) = config.main_fields {
            self.main_fields = v.into_iter().map(MainFieldEntry::named).collect();
        }
        if let Some(v) = config.main_files {
            self.main_files = v;
        }
        if let Some(v) = config.resolve_to_context {
            self.resolve_to_context = v;
        }
        if let Some(v) = config.fully_specified {
            self.fully_specified = v;
        }
        if let Some(v) = config.enforce_extension {
            self.enforce_extension = if v {
                EnforceExtension::Enabled
            } else {
                EnforceExtension::Disabled
            };
        }
        if let Some(v) = config.restrictions {
            self.restrictions = v.into_iter().map(|p| Restriction::Path(PathBuf::from(p))).collect();
        }
    }
}

/// The serde-friendly subset of [`ResolverOptions`], loadable from a JSON or
/// JSONC config file (§6.1). Anything behavior-carrying (`file_system`,
/// `plugins`, `pnp_api`) is out of scope here and must be supplied in code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfigFile {
    pub alias: Option<std::collections::BTreeMap<String, Vec<Option<String>>>>,
    pub alias_fields: Option<Vec<String>>,
    pub description_files: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub condition_names: Option<Vec<String>>,
    pub unsafe_cache: Option<bool>,
    pub symlinks: Option<bool>,
    pub modules: Option<Vec<String>>,
    pub main_fields: Option<Vec<String>>,
    pub main_files: Option<Vec<String>>,
    pub resolve_to_context: Option<bool>,
    pub fully_specified: Option<bool>,
    pub enforce_extension: Option<bool>,
    /// Plain filesystem-path restrictions; regex restrictions are code-only.
    pub restrictions: Option<Vec<String>>,
}
