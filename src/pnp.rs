//! The boundary to an external package-manager lookup API (Yarn PnP-style).
//! The pipeline only ever needs one operation from it; everything else
//! (`.pnp.cjs` loading, package registry bookkeeping) is the caller's
//! concern and out of scope here.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::ResolveError;

/// Resolves a bare module request on behalf of a package manager that owns
/// its own, non-`node_modules` module layout.
#[async_trait]
pub trait PackageManagerResolver: Send + Sync + std::fmt::Debug {
    /// `issuer` is the file doing the requiring; `request` is the bare
    /// module specifier. Returns the absolute path the package manager
    /// resolved it to, or `None` if it declines to handle this request
    /// (falling back to ordinary `node_modules` lookup).
    async fn resolve(
        &self,
        issuer: &PathBuf,
        request: &str,
    ) -> Result<Option<PathBuf>, ResolveError>;
}

/// A `pnp_api` that never handles anything; the default when
/// `ResolverOptions::pnp_api` is `None` and no auto-detected `.pnp.cjs`
/// exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPackageManagerResolver;

#[async_trait]
impl PackageManagerResolver for NoopPackageManagerResolver {
    async fn resolve(
        &self,
        _issuer: &PathBuf,
        _request: &str,
    ) -> Result<Option<PathBuf>, ResolveError> {
        Ok(None)
    }
}
