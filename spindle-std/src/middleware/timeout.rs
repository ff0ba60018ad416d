//! Timeout middleware.

use spindle_core::{
    BoxHandler, Handler, HandlerExt, Middleware, Request, Response, RouteContext,
    service_unavailable,
};
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

/// Bounds the rest of the chain to a fixed duration.
///
/// Requests that run over are answered with `503 Service Unavailable`.
#[derive(Debug, Clone, Copy)]
pub struct Timeout {
    duration: Duration,
}

impl Timeout {
    /// Create a timeout middleware.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// The configured limit.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Middleware for Timeout {
    fn wrap(&self, next: BoxHandler) -> BoxHandler {
        Bounded {
            next,
            duration: self.duration,
        }
        .boxed()
    }
}

struct Bounded {
    next: BoxHandler,
    duration: Duration,
}

impl Handler for Bounded {
    async fn call(&self, cx: &mut RouteContext, req: Request) -> Response {
        match timeout(self.duration, self.next.call(cx, req)).await {
            Ok(response) => response,
            Err(_) => {
                warn!(limit = ?self.duration, "request timed out");
                service_unavailable()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use spindle_core::{Body, from_fn};

    #[tokio::test]
    async fn test_fast_handler_passes() {
        let handler = Timeout::new(Duration::from_secs(1))
            .wrap(from_fn(|_req| async { "quick" }).boxed());
        let mut cx = RouteContext::new();

        let response = handler.call(&mut cx, Request::new(Body::new())).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_slow_handler_gets_503() {
        let handler = Timeout::new(Duration::from_millis(10)).wrap(
            from_fn(|_req| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            })
            .boxed(),
        );
        let mut cx = RouteContext::new();

        let response = handler.call(&mut cx, Request::new(Body::new())).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
