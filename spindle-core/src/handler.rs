//! # Handlers
//!
//! A [`Handler`] is the endpoint of a route: it receives the request-scoped
//! [`RouteContext`] and the request, and produces a [`Response`].
//!
//! Routers, mounted sub-routers and middleware-wrapped chains are all
//! handlers too, which is what lets them nest.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Handler`] uses `impl Future` returns for zero-cost static dispatch.
//! Routing tables store handlers as [`BoxHandler`], a shared pointer to the
//! object-safe [`DynHandler`]. Every `Handler` is a `DynHandler` through a
//! blanket implementation.
//!
//! # Usage Patterns
//!
//! 1. **Struct implementation**: `impl Handler for MyEndpoint`
//! 2. **Context-free closure**: `from_fn(|req| async move { ... })`
//! 3. **Context-aware closure**: `handler_fn(|cx, req| Box::pin(async move { ... }))`

use crate::{
    context::RouteContext,
    response::{IntoResponse, Request, Response},
};
use futures::future::BoxFuture;
use std::{future::Future, sync::Arc};

/// The endpoint of a route.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a request handler",
    label = "missing `Handler` implementation",
    note = "Wrap closures with `from_fn` or `handler_fn` to use them as handlers."
)]
pub trait Handler: Send + Sync + 'static {
    /// Serve a request.
    fn call(
        &self,
        cx: &mut RouteContext,
        req: Request,
    ) -> impl Future<Output = Response> + Send;
}

/// Dynamic object-safe version of [`Handler`].
pub trait DynHandler: Send + Sync + 'static {
    /// Serve a request (dynamic dispatch version).
    fn call_dyn<'a>(&'a self, cx: &'a mut RouteContext, req: Request) -> BoxFuture<'a, Response>;
}

// Blanket implementation: Any type implementing Handler implements DynHandler automatically.
impl<H: Handler> DynHandler for H {
    fn call_dyn<'a>(&'a self, cx: &'a mut RouteContext, req: Request) -> BoxFuture<'a, Response> {
        Box::pin(self.call(cx, req))
    }
}

/// A shared, type-erased handler.
pub type BoxHandler = Arc<dyn DynHandler>;

impl Handler for BoxHandler {
    async fn call(&self, cx: &mut RouteContext, req: Request) -> Response {
        (**self).call_dyn(cx, req).await
    }
}

/// Conversion helpers available on every handler.
pub trait HandlerExt: Handler + Sized {
    /// Erase the handler's type.
    fn boxed(self) -> BoxHandler {
        Arc::new(self)
    }
}

impl<H: Handler> HandlerExt for H {}

/// A handler built from a closure that ignores the routing context.
///
/// Created by [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

/// Build a handler from `Fn(Request) -> impl Future<Output = impl IntoResponse>`.
///
/// # Example
///
/// ```rust,ignore
/// let hello = from_fn(|_req| async { "hello" });
/// ```
pub fn from_fn<F, Fut>(f: F) -> FromFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoResponse,
{
    FromFn { f }
}

impl<F, Fut> Handler for FromFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoResponse,
{
    fn call(
        &self,
        _cx: &mut RouteContext,
        req: Request,
    ) -> impl Future<Output = Response> + Send {
        let fut = (self.f)(req);
        async move { fut.await.into_response() }
    }
}

/// A handler built from a closure that borrows the routing context.
///
/// Created by [`handler_fn`].
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

/// Build a handler from a closure receiving the routing context.
///
/// The returned future may borrow the context, so it is boxed explicitly:
///
/// ```rust,ignore
/// let show = handler_fn(|cx, _req| {
///     let id = cx.param("id").unwrap_or_default().to_owned();
///     Box::pin(async move { format!("user {id}").into_response() })
/// });
/// ```
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: for<'a> Fn(&'a mut RouteContext, Request) -> BoxFuture<'a, Response>
        + Send
        + Sync
        + 'static,
{
    HandlerFn { f }
}

impl<F> Handler for HandlerFn<F>
where
    F: for<'a> Fn(&'a mut RouteContext, Request) -> BoxFuture<'a, Response>
        + Send
        + Sync
        + 'static,
{
    fn call(
        &self,
        cx: &mut RouteContext,
        req: Request,
    ) -> impl Future<Output = Response> + Send {
        (self.f)(cx, req)
    }
}
