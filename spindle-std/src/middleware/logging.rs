//! Request logging middleware.

use spindle_core::{BoxHandler, Handler, HandlerExt, Middleware, Request, Response, RouteContext};
use std::{future::Future, time::Instant};
use tracing::{Instrument, info, info_span, warn};

/// Logs every request that passes through it.
///
/// Opens a `request` span carrying the method and path around the rest of
/// the chain, then logs the status and elapsed time: at `info` level, or
/// `warn` for server errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogger;

impl Middleware for RequestLogger {
    fn wrap(&self, next: BoxHandler) -> BoxHandler {
        Logged { next }.boxed()
    }
}

struct Logged {
    next: BoxHandler,
}

impl Handler for Logged {
    fn call(
        &self,
        cx: &mut RouteContext,
        req: Request,
    ) -> impl Future<Output = Response> + Send {
        let span = info_span!("request", method = %req.method(), path = req.uri().path());
        let started = Instant::now();

        async move {
            let response = self.next.call(cx, req).await;
            let status = response.status().as_u16();
            let elapsed = started.elapsed();
            if response.status().is_server_error() {
                warn!(status, ?elapsed, "request failed");
            } else {
                info!(status, ?elapsed, "request finished");
            }
            response
        }
        .instrument(span)
    }
}
