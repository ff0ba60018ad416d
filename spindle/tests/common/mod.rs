#![allow(dead_code)]

use spindle::{
    Body, BoxHandler, HandlerExt, IntoResponse, Request, Router, handler_fn,
    http::{self, Method, StatusCode},
    testing::body_text,
};

// ============================================================================
// Requests
// ============================================================================

pub fn request(method: Method, path: &str) -> Request {
    http::Request::builder()
        .method(method)
        .uri(path)
        .body(Body::new())
        .unwrap()
}

/// Serve `method path` and return status and body.
pub async fn send(router: &Router, method: Method, path: &str) -> (StatusCode, String) {
    let response = router.serve(request(method, path)).await.unwrap();
    (response.status(), body_text(&response))
}

pub async fn get(router: &Router, path: &str) -> (StatusCode, String) {
    send(router, Method::GET, path).await
}

// ============================================================================
// Handlers
// ============================================================================

/// Answers with a fixed body.
pub fn text(body: &'static str) -> BoxHandler {
    spindle::from_fn(move |_req| async move { body }).boxed()
}

/// Answers with the routing path override, or `-` when none is set.
pub fn route_path() -> BoxHandler {
    handler_fn(|cx, _req| {
        let path = cx.route_path().unwrap_or("-").to_owned();
        Box::pin(async move { path.into_response() })
    })
    .boxed()
}

pub fn custom_not_found() -> BoxHandler {
    spindle::from_fn(|_req| async { (StatusCode::NOT_FOUND, "nothing here") }).boxed()
}
