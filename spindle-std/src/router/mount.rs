//! Inline routers, sub-routers and mounts.

use super::Router;
use spindle_core::{
    BoxHandler, ConfigError, Handler, HandlerExt, MethodSet, Middlewares, PatternStore, Request,
    Response, Result, RouteContext, Routes,
};
use std::sync::Arc;
use tracing::debug;

/// What gets attached under a mount prefix.
enum MountTarget {
    /// Any handler. It only sees the path after the prefix.
    Handler(BoxHandler),
    /// A router, which also exposes its routes and not-found handler.
    Router(Router),
}

/// Strips the mount prefix before handing the request on.
struct Forward {
    target: BoxHandler,
}

impl Handler for Forward {
    async fn call(&self, cx: &mut RouteContext, req: Request) -> Response {
        cx.forward_wildcard();
        self.target.call(cx, req).await
    }
}

impl Router {
    /// Create an inline router with extra middleware.
    ///
    /// The returned router shares this router's routes. Handlers registered
    /// through it are wrapped in this router's inline middleware (if any)
    /// followed by `middlewares`. A non-inline router is sealed first.
    pub fn chain(&self, middlewares: Middlewares) -> Router {
        if !self.inner.inline {
            self.seal();
        }

        let mut stack = if self.inner.inline {
            self.inner.middlewares.lock().clone()
        } else {
            Middlewares::new()
        };
        stack.extend_from(&middlewares);

        Router::from_parts(
            self.inner.store.clone(),
            stack,
            true,
            self.inner.config.clone(),
        )
    }

    /// Create an inline router and populate it with `f`.
    ///
    /// ```rust,ignore
    /// router.group(|admin| {
    ///     admin.use_middleware(require_login)?;
    ///     admin.get("/admin/stats", stats)
    /// })?;
    /// ```
    pub fn group<F>(&self, f: F) -> Result<Router>
    where
        F: FnOnce(&Router) -> Result<()>,
    {
        let router = self.chain(Middlewares::new());
        f(&router)?;
        Ok(router)
    }

    /// Create a fresh sub-router, populate it with `f`, and mount it at
    /// `pattern`.
    ///
    /// The sub-router is backed by a [`Tree`](crate::routing::Tree) whatever
    /// store this router uses. See [`Router::route_with_store`] to choose.
    pub fn route<F>(&self, pattern: &str, f: F) -> Result<Router>
    where
        F: FnOnce(&Router) -> Result<()>,
    {
        let router = Router::with_config(self.inner.config.clone());
        self.populate_and_mount(pattern, router, f)
    }

    /// Like [`Router::route`], with the sub-router backed by `store`.
    ///
    /// ```rust,ignore
    /// router.route_with_store("/api", MatchitStore::new(), |api| {
    ///     api.get("/users/{id}", show_user)
    /// })?;
    /// ```
    pub fn route_with_store<S, F>(&self, pattern: &str, store: S, f: F) -> Result<Router>
    where
        S: PatternStore,
        F: FnOnce(&Router) -> Result<()>,
    {
        let router = Router::with_store_and_config(store, self.inner.config.clone());
        self.populate_and_mount(pattern, router, f)
    }

    fn populate_and_mount<F>(&self, pattern: &str, router: Router, f: F) -> Result<Router>
    where
        F: FnOnce(&Router) -> Result<()>,
    {
        f(&router)?;
        self.mount(pattern, &router)?;
        Ok(router)
    }

    /// Attach `router` under `pattern`.
    ///
    /// Requests to `pattern` and anything below `pattern/` are forwarded with
    /// the prefix stripped, so `/admin/dashboard` reaches the sub-router's
    /// `/dashboard`. A request to exactly `pattern/` is answered by the
    /// not-found handler.
    ///
    /// If `router` has no not-found override it inherits this router's.
    pub fn mount(&self, pattern: &str, router: &Router) -> Result<()> {
        self.mount_target(pattern, MountTarget::Router(router.clone()))
    }

    /// Attach an arbitrary handler under `pattern`.
    pub fn mount_handler<H: Handler>(&self, pattern: &str, handler: H) -> Result<()> {
        self.mount_target(pattern, MountTarget::Handler(handler.boxed()))
    }

    fn mount_target(&self, pattern: &str, target: MountTarget) -> Result<()> {
        if !pattern.starts_with('/') {
            return Err(ConfigError::InvalidPattern(pattern.to_owned()));
        }

        let bare = !pattern.ends_with('/');
        let prefix = if bare {
            format!("{pattern}/")
        } else {
            pattern.to_owned()
        };
        let catch_all = format!("{prefix}*");

        {
            let store = self.inner.store.read();
            if store.has_pattern(&format!("{pattern}*")) || store.has_pattern(&catch_all) {
                return Err(ConfigError::DuplicateMount(pattern.to_owned()));
            }
            if bare {
                store.validate(&[pattern, prefix.as_str(), catch_all.as_str()])?;
            } else {
                store.validate(&[catch_all.as_str()])?;
            }
        }

        let (forward, subroutes) = match target {
            MountTarget::Handler(handler) => (Forward { target: handler }.boxed(), None),
            MountTarget::Router(router) => {
                let inherited = self.inner.not_found.read().clone();
                if let Some(handler) = inherited {
                    if router.inner.not_found.read().is_none() {
                        router.set_not_found(handler);
                    }
                }
                let subroutes: Arc<dyn Routes> = Arc::new(router.clone());
                (Forward { target: router.boxed() }.boxed(), Some(subroutes))
            }
        };

        if bare {
            let stub = MethodSet::ANY | MethodSet::STUB;
            self.insert_route(stub, pattern, forward.clone(), None)?;
            self.insert_route(stub, &prefix, self.not_found_handler(), None)?;
        }

        let methods = if subroutes.is_some() {
            MethodSet::ANY | MethodSet::STUB
        } else {
            MethodSet::ANY
        };
        self.insert_route(methods, &catch_all, forward, subroutes)?;
        debug!(pattern, "mounted");
        Ok(())
    }
}
