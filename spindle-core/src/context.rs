//! # Request-scoped routing state
//!
//! A [`RouteContext`] lives for the duration of one request. It holds the
//! parameters captured by the pattern store and the path override a mount
//! installs before forwarding to its sub-router.
//!
//! Contexts are pooled by the router: one is acquired at the start of the
//! outermost dispatch, reset, threaded through every middleware, mounted
//! router and handler as `&mut RouteContext`, and returned to the pool when
//! the outermost dispatch finishes.
//!
//! # Nested dispatch
//!
//! Whether a dispatch is the outermost one is stated explicitly through
//! [`Scope`] instead of being discovered from ambient request state.

use crate::params::{Params, WILDCARD};

/// Routing state for a single in-flight request.
#[derive(Debug, Default)]
pub struct RouteContext {
    params: Params,
    route_path: String,
    depth: usize,
}

impl RouteContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything left over from a previous request.
    pub fn reset(&mut self) {
        self.params.clear();
        self.route_path.clear();
        self.depth = 0;
    }

    /// Parameters captured so far.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Mutable access to the captured parameters.
    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    /// Shorthand for `params().get(key)`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    /// Path override installed by a mount, if any.
    pub fn route_path(&self) -> Option<&str> {
        if self.route_path.is_empty() {
            None
        } else {
            Some(&self.route_path)
        }
    }

    /// Replace the path used for the next route lookup.
    ///
    /// An empty path clears the override.
    pub fn set_route_path(&mut self, path: &str) {
        self.route_path.clear();
        self.route_path.push_str(path);
    }

    /// Hand the wildcard capture to a mounted handler.
    ///
    /// Removes the `*` parameter and makes `"/" + remainder` the routing path,
    /// so the mounted handler only sees the part of the path after its mount
    /// prefix.
    pub fn forward_wildcard(&mut self) {
        let rest = self.params.remove(WILDCARD);
        self.route_path.clear();
        self.route_path.push('/');
        if let Some(rest) = rest {
            self.route_path.push_str(&rest);
        }
        self.depth += 1;
    }

    /// Number of mounts this request has been forwarded through.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Resolve the path to route on, alongside mutable parameter storage.
    ///
    /// The override path wins over `request_path` when set.
    pub fn split_path<'a>(&'a mut self, request_path: &'a str) -> (&'a mut Params, &'a str) {
        let path = if self.route_path.is_empty() {
            request_path
        } else {
            self.route_path.as_str()
        };
        (&mut self.params, path)
    }
}

/// Where a dispatch sits in the request's call stack.
#[derive(Debug)]
pub enum Scope<'a> {
    /// The outermost dispatch: acquire a fresh context from the pool.
    Root,
    /// A dispatch from inside another router: reuse its context.
    Nested(&'a mut RouteContext),
}

impl Scope<'_> {
    /// True for [`Scope::Nested`].
    pub fn is_nested(&self) -> bool {
        matches!(self, Scope::Nested(_))
    }
}
