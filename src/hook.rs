//! The hook registry: named stages, each an ordered list of tapped steps
//! (§4.1). Dispatch is async-series-bail: taps run in registration order,
//! and the first one to yield anything but "pass" short-circuits the rest.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;

use crate::{context::ResolveContext, error::ResolveError, request::ResolveRequest, resolver::Resolver};

/// What a single tap decided to do with the request it was handed.
pub enum StepOutcome {
    /// Pass `request` on to the next tap on this hook.
    Yield(ResolveRequest),
    /// Terminal resolution: stop dispatching, bubble this up.
    Done(ResolveRequest),
    /// The request was deliberately ignored (e.g. `alias: false`).
    Ignored,
    /// An unrecoverable error on this branch.
    Err(ResolveError),
}

impl StepOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, StepOutcome::Yield(_))
    }
}

/// A single tapped handler. Implementors are the ~17 steps of §4.3 plus
/// whatever a caller supplies via `ResolverOptions::plugins`.
#[async_trait]
pub trait Step: Send + Sync {
    /// Name used in tracing and in `ResolveError::Recursion`.
    fn name(&self) -> &'static str;

    async fn apply(
        &self,
        resolver: &Resolver,
        request: ResolveRequest,
        ctx: &mut ResolveContext,
    ) -> StepOutcome;
}

/// A named stage: an ordered tap list, dispatched async-series-bail.
pub struct Hook {
    name: &'static str,
    taps: Vec<Arc<dyn Step>>,
}

impl Hook {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            taps: Vec::new(),
        }
    }

    pub fn tap(&mut self, step: Arc<dyn Step>) {
        self.taps.push(step);
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) async fn call(
        &self,
        resolver: &Resolver,
        mut request: ResolveRequest,
        ctx: &mut ResolveContext,
    ) -> StepOutcome {
        for tap in &self.taps {
            ctx.trace(format!(
                "tap '{}' on hook '{}' for '{}{}'",
                tap.name(),
                self.name,
                request.path.display(),
                request.request
            ));
            match tap.apply(resolver, request, ctx).await {
                StepOutcome::Yield(next) => request = next,
                other => return other,
            }
        }
        StepOutcome::Yield(request)
    }
}

/// Owns every named hook. Built once by the factory, then read-only for the
/// lifetime of the `Resolver`.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<&'static str, Hook>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the hook named `name`, creating it (empty) if it doesn't
    /// exist yet. Mirrors the factory's `ensureHook`.
    pub fn ensure_hook(&mut self, name: &'static str) -> &mut Hook {
        self.hooks.entry(name).or_insert_with(|| Hook::new(name))
    }

    pub fn get(&self, name: &str) -> Option<&Hook> {
        self.hooks.get(name)
    }
}
