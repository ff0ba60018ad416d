//! Route introspection.

use crate::{method::MethodSet, middleware::Middlewares};
use std::{fmt, sync::Arc};

/// Anything that can list the routes it serves.
///
/// Routers implement this; mounted routers are reachable through
/// [`RouteInfo::subroutes`], which is how route walkers descend.
pub trait Routes: Send + Sync + 'static {
    /// Every route, in store order.
    fn routes(&self) -> Vec<RouteInfo>;

    /// The middleware applied to every route.
    fn middlewares(&self) -> Middlewares;
}

/// A snapshot of one stored route.
#[derive(Clone)]
pub struct RouteInfo {
    /// Pattern as registered, e.g. `/users/{id}` or `/admin/*`.
    pub pattern: String,
    /// Real methods with a handler. `STUB` never appears here.
    pub methods: MethodSet,
    /// True if the route was created by a mount.
    pub is_mount: bool,
    /// The router mounted on this route, if any.
    pub subroutes: Option<Arc<dyn Routes>>,
}

impl fmt::Debug for RouteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteInfo")
            .field("pattern", &self.pattern)
            .field("methods", &self.methods)
            .field("is_mount", &self.is_mount)
            .field("subroutes", &self.subroutes.is_some())
            .finish()
    }
}
