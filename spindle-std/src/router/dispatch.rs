//! Request dispatch.

use super::{Router, SharedStore};
use parking_lot::RwLock;
use spindle_core::{
    BoxHandler, ConfigError, Handler, MethodSet, Request, Response, Result, RouteContext, Scope,
    internal_error, method_not_allowed, not_found,
};
use std::sync::Arc;
use tracing::{error, trace};

/// The innermost handler of every router: looks the request up in the
/// store and calls whatever it finds.
pub(super) struct RouteHttp {
    store: SharedStore,
    not_found: Arc<RwLock<Option<BoxHandler>>>,
}

enum Lookup {
    Found(BoxHandler),
    MethodNotAllowed,
    NotFound,
}

impl RouteHttp {
    pub(super) fn new(router: &Router) -> Self {
        Self {
            store: router.inner.store.clone(),
            not_found: router.inner.not_found.clone(),
        }
    }

    fn lookup(&self, cx: &mut RouteContext, req: &Request, method: MethodSet) -> Lookup {
        let store = self.store.read();
        let (params, path) = cx.split_path(req.uri().path());
        let Some(endpoints) = store.find(params, path) else {
            trace!(path, "no route matched");
            return Lookup::NotFound;
        };
        match endpoints.get(method) {
            Some(handler) => Lookup::Found(handler.clone()),
            None => {
                trace!(path, %method, "method not allowed");
                Lookup::MethodNotAllowed
            }
        }
    }
}

impl Handler for RouteHttp {
    async fn call(&self, cx: &mut RouteContext, req: Request) -> Response {
        let Some(method) = MethodSet::from_method(req.method()) else {
            trace!(method = %req.method(), "unsupported method");
            return method_not_allowed();
        };

        match self.lookup(cx, &req, method) {
            Lookup::Found(handler) => handler.call(cx, req).await,
            Lookup::MethodNotAllowed => method_not_allowed(),
            Lookup::NotFound => {
                let handler = self.not_found.read().clone();
                match handler {
                    Some(handler) => handler.call(cx, req).await,
                    None => not_found(),
                }
            }
        }
    }
}

impl Router {
    /// Route a request from the outside world.
    ///
    /// Shorthand for `dispatch(Scope::Root, req)`.
    pub async fn serve(&self, req: Request) -> Result<Response> {
        self.dispatch(Scope::Root, req).await
    }

    /// Route a request.
    ///
    /// With [`Scope::Root`] a routing context is borrowed from the pool for
    /// the duration of the call. With [`Scope::Nested`] the caller's context
    /// is reused and the pool is left alone.
    ///
    /// Fails with [`ConfigError::NoRoutes`] if nothing was ever registered.
    pub async fn dispatch(&self, scope: Scope<'_>, req: Request) -> Result<Response> {
        let Some(handler) = self.inner.handler.get() else {
            return Err(ConfigError::NoRoutes);
        };

        let response = match scope {
            Scope::Nested(cx) => handler.call(cx, req).await,
            Scope::Root => {
                let mut cx = self.inner.pool.acquire();
                handler.call(&mut cx, req).await
            }
        };
        Ok(response)
    }
}

/// A router is a handler, which is how it gets mounted under another one.
impl Handler for Router {
    async fn call(&self, cx: &mut RouteContext, req: Request) -> Response {
        match self.dispatch(Scope::Nested(cx), req).await {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "mounted router cannot serve");
                internal_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spindle_core::{Body, HandlerExt, from_fn};

    fn get(path: &str) -> Request {
        let mut req = Request::new(Body::new());
        *req.uri_mut() = path.parse().unwrap();
        req
    }

    #[tokio::test]
    async fn test_unsealed_router_has_no_routes() {
        let router = Router::new();
        assert_eq!(router.serve(get("/")).await.unwrap_err(), ConfigError::NoRoutes);
    }

    #[tokio::test]
    async fn test_nested_unsealed_router_answers_500() {
        let router = Router::new();
        let mut cx = RouteContext::new();
        let response = router.call(&mut cx, get("/")).await;
        assert_eq!(response.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_root_dispatch_returns_context_to_pool() {
        let router = Router::new();
        router.get("/", from_fn(|_req| async { "home" })).unwrap();

        router.serve(get("/")).await.unwrap();
        router.serve(get("/")).await.unwrap();
        assert_eq!(router.inner.pool.idle(), 1);
    }

    #[tokio::test]
    async fn test_nested_dispatch_skips_pool() {
        let router = Router::new();
        router.get("/", from_fn(|_req| async { "home" }).boxed()).unwrap();

        let mut cx = RouteContext::new();
        let response = router.dispatch(Scope::Nested(&mut cx), get("/")).await.unwrap();
        assert_eq!(response.status(), http::StatusCode::OK);
        assert_eq!(router.inner.pool.idle(), 0);
    }

    #[tokio::test]
    async fn test_unknown_method_is_405() {
        let router = Router::new();
        router.any("/", from_fn(|_req| async { "home" })).unwrap();

        let mut req = get("/");
        *req.method_mut() = http::Method::from_bytes(b"BREW").unwrap();
        let response = router.serve(req).await.unwrap();
        assert_eq!(response.status(), http::StatusCode::METHOD_NOT_ALLOWED);
    }
}
