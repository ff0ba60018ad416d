//! Testing utilities for Spindle.
//!
//! This module provides helpers for exercising routers without a server.
//!
//! # Features
//!
//! - [`Journal`]: A shared, ordered log of what ran
//! - [`RecordingMiddleware`]: Writes `name:before` / `name:after` to a journal
//! - [`RecordingHandler`]: Writes its name to a journal and echoes it back
//! - [`CountingHandler`]: Counts invocations
//! - [`ParamsProbe`]: Captures the routing context a handler was called with
//! - [`request`] and [`body_text`]: Build requests and read responses

use http::{Method, Uri};
use parking_lot::Mutex;
use spindle_core::{
    Body, BoxHandler, Handler, HandlerExt, IntoResponse, Middleware, Params, Request, Response,
    RouteContext,
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Requests and responses
// ============================================================================

/// Build a request with an empty body.
///
/// ```rust,ignore
/// let response = router.serve(request(Method::GET, "/users/42")).await?;
/// ```
pub fn request(method: Method, path: &'static str) -> Request {
    let mut req = Request::new(Body::new());
    *req.method_mut() = method;
    *req.uri_mut() = Uri::from_static(path);
    req
}

/// The response body as (lossy) UTF-8.
pub fn body_text(response: &Response) -> String {
    String::from_utf8_lossy(response.body()).into_owned()
}

// ============================================================================
// Journal
// ============================================================================

/// An ordered log shared between test fixtures.
///
/// Clones write to the same log.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    /// Get a copy of every entry so far.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

// ============================================================================
// Recording Middleware
// ============================================================================

/// A middleware that records when the request passes in and out.
///
/// # Example
///
/// ```rust,ignore
/// let journal = Journal::new();
/// router.use_middleware(RecordingMiddleware::new("m1", &journal))?;
/// router.use_middleware(RecordingMiddleware::new("m2", &journal))?;
///
/// // ... dispatch ...
///
/// assert_eq!(journal.entries(), ["m1:before", "m2:before", "h", "m2:after", "m1:after"]);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingMiddleware {
    name: &'static str,
    journal: Journal,
}

impl RecordingMiddleware {
    /// Create a recording middleware writing to `journal`.
    pub fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: journal.clone(),
        }
    }
}

impl Middleware for RecordingMiddleware {
    fn wrap(&self, next: BoxHandler) -> BoxHandler {
        Recorded {
            name: self.name,
            journal: self.journal.clone(),
            next,
        }
        .boxed()
    }
}

struct Recorded {
    name: &'static str,
    journal: Journal,
    next: BoxHandler,
}

impl Handler for Recorded {
    async fn call(&self, cx: &mut RouteContext, req: Request) -> Response {
        self.journal.record(format!("{}:before", self.name));
        let response = self.next.call(cx, req).await;
        self.journal.record(format!("{}:after", self.name));
        response
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records its name and answers `200` with its name as body.
#[derive(Debug, Clone)]
pub struct RecordingHandler {
    name: &'static str,
    journal: Journal,
}

impl RecordingHandler {
    /// Create a recording handler writing to `journal`.
    pub fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: journal.clone(),
        }
    }
}

impl Handler for RecordingHandler {
    async fn call(&self, _cx: &mut RouteContext, _req: Request) -> Response {
        self.journal.record(self.name);
        self.name.into_response()
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// router.get("/", counter.clone())?;
///
/// router.serve(request(Method::GET, "/")).await?;
///
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Handler for CountingHandler {
    async fn call(&self, _cx: &mut RouteContext, _req: Request) -> Response {
        self.count.fetch_add(1, Ordering::SeqCst);
        "ok".into_response()
    }
}

// ============================================================================
// Params Probe
// ============================================================================

/// What a [`ParamsProbe`] saw on its last call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Captured parameters.
    pub params: Params,
    /// The path override installed by mounts, if any.
    pub route_path: Option<String>,
    /// Mount depth.
    pub depth: usize,
}

/// A handler that captures the routing context it was called with.
///
/// Answers `200` with the captured parameters as `key=value` pairs, sorted
/// and joined with `&`.
#[derive(Debug, Clone, Default)]
pub struct ParamsProbe {
    last: Arc<Mutex<Option<Snapshot>>>,
}

impl ParamsProbe {
    /// Create a probe that hasn't been called yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The context seen on the most recent call.
    pub fn last(&self) -> Option<Snapshot> {
        self.last.lock().clone()
    }
}

impl Handler for ParamsProbe {
    async fn call(&self, cx: &mut RouteContext, _req: Request) -> Response {
        let snapshot = Snapshot {
            params: cx.params().clone(),
            route_path: cx.route_path().map(str::to_owned),
            depth: cx.depth(),
        };

        let mut pairs: Vec<_> = snapshot
            .params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        pairs.sort();

        *self.last.lock() = Some(snapshot);
        pairs.join("&").into_response()
    }
}
