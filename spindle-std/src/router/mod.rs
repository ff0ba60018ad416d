//! # Router
//!
//! [`Router`] ties a [`PatternStore`] to a middleware stack and a context
//! pool.
//!
//! # Lifecycle
//!
//! A router starts *unsealed*: middleware can be added with
//! [`Router::use_middleware`]. The first route registration (or the first
//! [`Router::chain`]) *seals* it by composing the middleware around the
//! route dispatcher. From then on the middleware stack is frozen; routes can
//! still be added, but registration is expected to finish before traffic
//! starts.
//!
//! # Inline routers
//!
//! [`Router::chain`] and [`Router::group`] return *inline* routers. They share
//! the parent's store but keep their own middleware list, which is folded
//! into every handler registered through them rather than into a dispatch
//! chain of their own.
//!
//! # Example
//!
//! ```rust,ignore
//! let router = Router::new();
//! router.use_middleware(RequestLogger)?;
//! router.get("/", from_fn(|_req| async { "home" }))?;
//! router.route("/users", |users| {
//!     users.get("/{id}", show_user)?;
//!     users.post("/", create_user)
//! })?;
//!
//! let response = router.serve(request).await?;
//! ```

mod dispatch;
mod mount;
mod walk;

pub use walk::walk;

use crate::{
    pool::{ContextPool, DEFAULT_POOL_CAPACITY},
    routing::Tree,
};
use dispatch::RouteHttp;
use parking_lot::{Mutex, RwLock};
use spindle_core::{
    BoxHandler, ConfigError, Handler, HandlerExt, Middleware, MethodSet, Middlewares,
    PatternStore, Result, RouteInfo, Routes, from_fn, not_found,
};
use std::{
    fmt,
    sync::{Arc, OnceLock},
};
use tracing::debug;

type SharedStore = Arc<RwLock<Box<dyn PatternStore>>>;

/// Runtime settings for a [`Router`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Maximum number of idle routing contexts kept for reuse.
    pub pool_capacity: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

struct Inner {
    store: SharedStore,
    middlewares: Mutex<Middlewares>,
    inline: bool,
    /// Set once the router is sealed.
    handler: OnceLock<BoxHandler>,
    pool: ContextPool,
    not_found: Arc<RwLock<Option<BoxHandler>>>,
    config: RouterConfig,
}

/// An HTTP request router.
///
/// `Router` is a handle: clones share the same routes, middleware and pool.
#[derive(Clone)]
pub struct Router {
    inner: Arc<Inner>,
}

macro_rules! method_routes {
    ($($(#[$doc:meta])* $name:ident => $method:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name<H: Handler>(&self, pattern: &str, handler: H) -> Result<()> {
                self.handle(MethodSet::$method, pattern, handler)
            }
        )*
    };
}

impl Router {
    /// Create a router backed by a [`Tree`].
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Create a router backed by a [`Tree`] with custom settings.
    pub fn with_config(config: RouterConfig) -> Self {
        Self::with_store_and_config(Tree::new(), config)
    }

    /// Create a router backed by `store`.
    pub fn with_store<S: PatternStore>(store: S) -> Self {
        Self::with_store_and_config(store, RouterConfig::default())
    }

    /// Create a router backed by `store` with custom settings.
    pub fn with_store_and_config<S: PatternStore>(store: S, config: RouterConfig) -> Self {
        let store: Box<dyn PatternStore> = Box::new(store);
        Self::from_parts(Arc::new(RwLock::new(store)), Middlewares::new(), false, config)
    }

    fn from_parts(
        store: SharedStore,
        middlewares: Middlewares,
        inline: bool,
        config: RouterConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                middlewares: Mutex::new(middlewares),
                inline,
                handler: OnceLock::new(),
                pool: ContextPool::with_capacity(config.pool_capacity),
                not_found: Arc::new(RwLock::new(None)),
                config,
            }),
        }
    }

    /// Append a middleware to the stack.
    ///
    /// Fails with [`ConfigError::MiddlewareAfterSeal`] once a route has been
    /// registered.
    pub fn use_middleware<M: Middleware>(&self, middleware: M) -> Result<()> {
        let mut stack = self.inner.middlewares.lock();
        if self.is_sealed() {
            return Err(ConfigError::MiddlewareAfterSeal);
        }
        stack.push(middleware);
        Ok(())
    }

    /// Append every middleware of `middlewares`, in order.
    pub fn use_middlewares(&self, middlewares: &Middlewares) -> Result<()> {
        let mut stack = self.inner.middlewares.lock();
        if self.is_sealed() {
            return Err(ConfigError::MiddlewareAfterSeal);
        }
        stack.extend_from(middlewares);
        Ok(())
    }

    /// Register `handler` for `methods` at `pattern`.
    pub fn handle<H: Handler>(&self, methods: MethodSet, pattern: &str, handler: H) -> Result<()> {
        self.insert_route(methods, pattern, handler.boxed(), None)
    }

    /// Register `handler` for every method at `pattern`.
    pub fn any<H: Handler>(&self, pattern: &str, handler: H) -> Result<()> {
        self.handle(MethodSet::ANY, pattern, handler)
    }

    method_routes! {
        /// Register a `CONNECT` route.
        connect => CONNECT;
        /// Register a `DELETE` route.
        delete => DELETE;
        /// Register a `GET` route.
        get => GET;
        /// Register a `HEAD` route.
        head => HEAD;
        /// Register an `OPTIONS` route.
        options => OPTIONS;
        /// Register a `PATCH` route.
        patch => PATCH;
        /// Register a `POST` route.
        post => POST;
        /// Register a `PUT` route.
        put => PUT;
        /// Register a `TRACE` route.
        trace => TRACE;
    }

    /// Replace the default 404 responder.
    pub fn not_found<H: Handler>(&self, handler: H) {
        self.set_not_found(handler.boxed());
    }

    fn set_not_found(&self, handler: BoxHandler) {
        *self.inner.not_found.write() = Some(handler);
    }

    /// The handler used when no route matches: the override set with
    /// [`Router::not_found`], or the default 404 responder.
    pub fn not_found_handler(&self) -> BoxHandler {
        match self.inner.not_found.read().clone() {
            Some(handler) => handler,
            None => from_fn(|_req| async { not_found() }).boxed(),
        }
    }

    /// True once the middleware stack is frozen.
    pub fn is_sealed(&self) -> bool {
        self.inner.handler.get().is_some()
    }

    /// True for routers created by [`Router::chain`] or [`Router::group`].
    pub fn is_inline(&self) -> bool {
        self.inner.inline
    }

    /// The routing context pool used by root dispatches.
    pub fn pool(&self) -> &ContextPool {
        &self.inner.pool
    }

    /// The settings this router was created with.
    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }

    /// Build the composed handler if it doesn't exist yet.
    fn seal(&self) -> &BoxHandler {
        self.inner.handler.get_or_init(|| {
            let endpoint = RouteHttp::new(self).boxed();
            if self.inner.inline {
                return endpoint;
            }
            let stack = self.inner.middlewares.lock();
            debug!(middlewares = stack.len(), "router sealed");
            stack.handler(endpoint)
        })
    }

    fn insert_route(
        &self,
        methods: MethodSet,
        pattern: &str,
        handler: BoxHandler,
        subroutes: Option<Arc<dyn Routes>>,
    ) -> Result<()> {
        if !pattern.starts_with('/') {
            return Err(ConfigError::InvalidPattern(pattern.to_owned()));
        }

        self.seal();
        let handler = if self.inner.inline {
            self.inner.middlewares.lock().handler(handler)
        } else {
            handler
        };

        let mut store = self.inner.store.write();
        let route = store.insert(methods, pattern, handler)?;
        if let Some(subroutes) = subroutes {
            route.set_subroutes(subroutes);
        }
        debug!(%methods, pattern, "route registered");
        Ok(())
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Routes for Router {
    fn routes(&self) -> Vec<RouteInfo> {
        self.inner.store.read().routes()
    }

    fn middlewares(&self) -> Middlewares {
        self.inner.middlewares.lock().clone()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.inner.store.read().len())
            .field("middlewares", &self.inner.middlewares.lock().len())
            .field("inline", &self.inner.inline)
            .field("sealed", &self.is_sealed())
            .field("pool", &self.inner.pool)
            .finish()
    }
}
