//! # Middleware
//!
//! A middleware turns a handler into another handler: it can act before
//! the request reaches the wrapped handler, after the response comes back,
//! or answer early without calling it at all.
//!
//! # Ordering
//!
//! Middleware registered as `[m1, m2]` around handler `h` runs as
//!
//! ```text
//! m1 before → m2 before → h → m2 after → m1 after
//! ```
//!
//! i.e. the first registered middleware is the outermost layer.

use crate::handler::BoxHandler;
use std::{fmt, sync::Arc};

/// A function from handler to handler.
///
/// Implemented for every `Fn(BoxHandler) -> BoxHandler` closure.
pub trait Middleware: Send + Sync + 'static {
    /// Wrap `next`, returning the handler that runs in its place.
    fn wrap(&self, next: BoxHandler) -> BoxHandler;
}

impl<F> Middleware for F
where
    F: Fn(BoxHandler) -> BoxHandler + Send + Sync + 'static,
{
    fn wrap(&self, next: BoxHandler) -> BoxHandler {
        (self)(next)
    }
}

/// Compose `middlewares` around `endpoint`.
///
/// The result is `middlewares[0](middlewares[1](...(endpoint)))`. An empty
/// slice returns `endpoint` unchanged.
pub fn chain(middlewares: &[Arc<dyn Middleware>], endpoint: BoxHandler) -> BoxHandler {
    middlewares
        .iter()
        .rev()
        .fold(endpoint, |next, middleware| middleware.wrap(next))
}

/// An ordered middleware stack.
///
/// Cloning is cheap: only the `Arc` pointers are copied.
#[derive(Clone, Default)]
pub struct Middlewares {
    stack: Vec<Arc<dyn Middleware>>,
}

impl Middlewares {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a middleware, builder style.
    pub fn with<M: Middleware>(mut self, middleware: M) -> Self {
        self.push(middleware);
        self
    }

    /// Append a middleware.
    pub fn push<M: Middleware>(&mut self, middleware: M) {
        self.stack.push(Arc::new(middleware));
    }

    /// Append every middleware of `other`, keeping its order.
    pub fn extend_from(&mut self, other: &Middlewares) {
        self.stack.extend(other.stack.iter().cloned());
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Middleware>> {
        self.stack.iter()
    }

    /// Number of middleware in the stack.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// True if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Compose the stack around `endpoint`. See [`chain`].
    pub fn handler(&self, endpoint: BoxHandler) -> BoxHandler {
        chain(&self.stack, endpoint)
    }
}

impl fmt::Debug for Middlewares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middlewares")
            .field("len", &self.stack.len())
            .finish()
    }
}
