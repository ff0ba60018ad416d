//! # spindle - Composable HTTP Request Router
//!
//! `spindle` matches requests against `/`-rooted patterns with `{name}`
//! parameters and trailing `*` wildcards, runs them through onion-ordered
//! middleware, and lets routers be mounted under each other.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spindle::prelude::*;
//!
//! let router = Router::new();
//! router.use_middleware(RequestLogger)?;
//! router.get("/", from_fn(|_req| async { "welcome" }))?;
//! router.get("/users/{id}", handler_fn(|cx, _req| {
//!     let id = cx.param("id").unwrap_or_default().to_owned();
//!     Box::pin(async move { format!("user {id}").into_response() })
//! }))?;
//!
//! router.route("/admin", |admin| {
//!     admin.get("/dashboard", from_fn(|_req| async { "stats" }))
//! })?;
//!
//! let response = router.serve(request).await?;
//! ```
//!
//! ## Errors
//!
//! Registration mistakes (unrooted patterns, middleware after the first
//! route, mounting twice on one prefix, serving an empty router) come back
//! as [`ConfigError`]. Unknown paths and methods are ordinary 404 and 405
//! responses.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Handlers
pub use spindle_core::{
    BoxHandler, DynHandler, FromFn, Handler, HandlerExt, HandlerFn, from_fn, handler_fn,
};

// Middleware
pub use spindle_core::{Middleware, Middlewares, chain};

// Methods
pub use spindle_core::{METHOD_COUNT, MethodSet};

// Context
pub use spindle_core::{Params, RouteContext, Scope, WILDCARD};

// Responses
pub use spindle_core::{
    Body, IntoResponse, Request, Response, internal_error, method_not_allowed, not_found,
    service_unavailable,
};

// Stores
pub use spindle_core::{Endpoints, PatternStore, Route};

// Introspection
pub use spindle_core::{RouteInfo, Routes};

// Errors
pub use spindle_core::{BoxError, ConfigError, PatternError, Result};

pub use http;

pub use spindle_std::{
    pool::{ContextPool, DEFAULT_POOL_CAPACITY, PooledContext},
    router::{Router, RouterConfig, walk},
};

/// Pattern store implementations.
pub mod routing {
    #[cfg(feature = "matchit")]
    pub use spindle_std::routing::MatchitStore;
    pub use spindle_std::routing::Tree;
}

/// Standard middleware.
pub mod middleware {
    #![allow(clippy::wildcard_imports)]
    pub use spindle_std::middleware::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use spindle_std::testing::*;
}

/// Prelude module - common imports for Spindle.
///
/// # Usage
///
/// ```rust,ignore
/// use spindle::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ConfigError, Handler, HandlerExt, IntoResponse, MethodSet, Middleware, Middlewares,
        Request, Response, RouteContext, Router, Routes, from_fn, handler_fn,
        middleware::RequestLogger,
    };
}
