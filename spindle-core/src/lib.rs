//! # spindle-core
//!
//! Core types and traits for the Spindle HTTP request router.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! middleware authors and alternative pattern stores that don't need the
//! full `spindle-std` router.
//!
//! # Building Blocks
//!
//! ## Method sets ([`MethodSet`])
//!
//! A bitmask over the nine supported HTTP methods plus two synthetic flags:
//! `ANY` (every real method) and `STUB` (mount placeholders).
//!
//! ## Handlers ([`Handler`])
//!
//! The terminal unit of request processing. A handler receives the
//! request-scoped [`RouteContext`] and the request, and produces a response.
//! [`DynHandler`] is the object-safe form stored in routing tables.
//!
//! ## Middleware ([`Middleware`])
//!
//! Functions from handler to handler. A sequence of middleware is composed
//! with [`chain`] so that the first registered middleware sees the request
//! first and the response last.
//!
//! ## Pattern stores ([`PatternStore`])
//!
//! The seam between the router and the data structure that stores route
//! patterns and performs parameter capture.
//!
//! # Error Types
//!
//! - [`ConfigError`] - Registration-time programmer errors
//! - [`PatternError`] - Malformed route patterns

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
mod handler;
mod method;
mod middleware;
mod params;
mod response;
mod routes;
mod store;

// Re-exports
pub use context::{RouteContext, Scope};
pub use error::{BoxError, ConfigError, PatternError, Result};
pub use handler::{
    BoxHandler, DynHandler, FromFn, Handler, HandlerExt, HandlerFn, from_fn, handler_fn,
};
pub use method::{METHOD_COUNT, MethodSet};
pub use middleware::{Middleware, Middlewares, chain};
pub use params::{Params, WILDCARD};
pub use response::{
    Body, IntoResponse, Request, Response, internal_error, method_not_allowed, not_found,
    service_unavailable,
};
pub use routes::{RouteInfo, Routes};
pub use store::{Endpoints, PatternStore, Route};
