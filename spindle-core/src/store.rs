//! # Pattern store seam
//!
//! The router doesn't care how patterns are stored or matched; it talks to
//! a [`PatternStore`]. `spindle-std` provides a trie (`Tree`) and, behind
//! the `matchit` feature, an adapter over the `matchit` crate.
//!
//! # Pattern syntax
//!
//! - Patterns begin with `/`.
//! - `{name}` captures one path segment under `name`.
//! - A trailing `*` captures the rest of the path under [`WILDCARD`].
//!
//! [`WILDCARD`]: crate::WILDCARD

use crate::{
    error::PatternError,
    handler::BoxHandler,
    method::{METHOD_COUNT, MethodSet},
    params::Params,
    routes::{RouteInfo, Routes},
};
use std::{fmt, sync::Arc};

/// Per-method handlers registered on one pattern.
#[derive(Clone, Default)]
pub struct Endpoints {
    handlers: [Option<BoxHandler>; METHOD_COUNT],
    stub: bool,
}

impl Endpoints {
    /// Create an empty endpoint table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every real method in `methods`.
    ///
    /// Existing handlers for those methods are replaced; others are kept.
    pub fn insert(&mut self, methods: MethodSet, handler: BoxHandler) {
        for method in methods.methods() {
            if let Some(slot) = method.index() {
                self.handlers[slot] = Some(handler.clone());
            }
        }
        if methods.contains(MethodSet::STUB) {
            self.stub = true;
        }
    }

    /// Handler for a single real method.
    pub fn get(&self, method: MethodSet) -> Option<&BoxHandler> {
        method.index().and_then(|slot| self.handlers[slot].as_ref())
    }

    /// The real methods that have a handler.
    pub fn methods(&self) -> MethodSet {
        MethodSet::ANY
            .methods()
            .filter(|method| self.get(*method).is_some())
            .fold(MethodSet::empty(), |set, method| set | method)
    }

    /// True if a mount placeholder was registered here.
    pub fn is_stub(&self) -> bool {
        self.stub
    }
}

impl fmt::Debug for Endpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoints")
            .field("methods", &self.methods())
            .field("stub", &self.stub)
            .finish()
    }
}

/// A stored route: one pattern with its endpoints.
///
/// This is the route handle returned by [`PatternStore::insert`].
pub struct Route {
    pattern: String,
    endpoints: Endpoints,
    subroutes: Option<Arc<dyn Routes>>,
}

impl Route {
    /// Create a route with no endpoints.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            endpoints: Endpoints::new(),
            subroutes: None,
        }
    }

    /// The pattern this route was registered under.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Handlers by method.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Mutable handlers by method.
    pub fn endpoints_mut(&mut self) -> &mut Endpoints {
        &mut self.endpoints
    }

    /// Record the sub-router mounted on this route.
    pub fn set_subroutes(&mut self, subroutes: Arc<dyn Routes>) {
        self.subroutes = Some(subroutes);
    }

    /// The sub-router mounted on this route, if any.
    pub fn subroutes(&self) -> Option<&Arc<dyn Routes>> {
        self.subroutes.as_ref()
    }

    /// Snapshot used for route listings.
    pub fn info(&self) -> RouteInfo {
        RouteInfo {
            pattern: self.pattern.clone(),
            methods: self.endpoints.methods(),
            is_mount: self.endpoints.is_stub(),
            subroutes: self.subroutes.clone(),
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("endpoints", &self.endpoints)
            .field("subroutes", &self.subroutes.is_some())
            .finish()
    }
}

/// Storage and matching for route patterns.
///
/// Registration is single-writer; matching happens concurrently from many
/// requests through `&self`.
pub trait PatternStore: Send + Sync + 'static {
    /// Store `handler` for `methods` at `pattern`.
    ///
    /// Inserting at a pattern that already exists merges the new methods
    /// into the same [`Route`].
    fn insert(
        &mut self,
        methods: MethodSet,
        pattern: &str,
        handler: BoxHandler,
    ) -> Result<&mut Route, PatternError>;

    /// Check that every pattern in `patterns` could be inserted, without
    /// storing anything.
    ///
    /// Registrations that add several routes at once call this first so a
    /// bad pattern leaves the store unchanged.
    fn validate(&self, patterns: &[&str]) -> Result<(), PatternError>;

    /// Find the most specific route matching `path`.
    ///
    /// On a match, captured values are written into `params` (a trailing
    /// wildcard under `*`). On a miss, `params` is left untouched.
    fn find(&self, params: &mut Params, path: &str) -> Option<&Endpoints>;

    /// True if `pattern` was registered verbatim.
    fn has_pattern(&self, pattern: &str) -> bool;

    /// Every stored route.
    fn routes(&self) -> Vec<RouteInfo>;

    /// Number of stored routes.
    fn len(&self) -> usize;

    /// True if no route is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
