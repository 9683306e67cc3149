//! The ~20 tapped steps that implement §4.3, plus the ambient additions
//! from §4.3.1. [`crate::factory::ResolverFactory`] wires these onto the
//! named hooks from [`crate::hooks`] in the order the dataflow graph
//! requires.

mod alias;
mod alias_field;
mod append;
mod description_file;
mod directory_exists;
mod exports_field;
mod file_exists;
mod file_kind;
mod imports_field;
mod join_request;
mod main_field;
mod module_kind;
mod modules_in_hierarchic_directories;
mod modules_in_root;
mod next;
mod package_manager_lookup;
mod parse;
mod restrictions;
mod result;
mod symlink;
mod unsafe_cache;
mod use_file;

pub use alias::AliasPlugin;
pub use alias_field::AliasFieldPlugin;
pub use append::AppendPlugin;
pub use description_file::DescriptionFilePlugin;
pub use directory_exists::DirectoryExistsPlugin;
pub use exports_field::ExportsFieldPlugin;
pub use file_exists::FileExistsPlugin;
pub use file_kind::FileKindPlugin;
pub use imports_field::ImportsFieldPlugin;
pub use join_request::{split_module_request, JoinRequestPartPlugin, JoinRequestPlugin};
pub use main_field::MainFieldPlugin;
pub use module_kind::ModuleKindPlugin;
pub use modules_in_hierarchic_directories::ModulesInHierarchicDirectoriesPlugin;
pub use modules_in_root::ModulesInRootPlugin;
pub use next::{NextPlugin, TryNextPlugin};
pub use package_manager_lookup::PackageManagerLookupPlugin;
pub use parse::ParsePlugin;
pub use restrictions::RestrictionsPlugin;
pub use result::ResultPlugin;
pub use symlink::SymlinkPlugin;
pub use unsafe_cache::UnsafeCachePlugin;
pub use use_file::UseFilePlugin;
