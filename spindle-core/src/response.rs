//! Request and response types, plus conversions into responses.

use bytes::Bytes;
use http::{HeaderValue, StatusCode, header};

/// Body type used by requests and responses.
pub type Body = Bytes;

/// An HTTP request as seen by handlers.
pub type Request = http::Request<Body>;

/// An HTTP response produced by handlers.
pub type Response = http::Response<Body>;

/// Trait for converting a handler's output into a [`Response`].
///
/// # Default Implementations
///
/// - `Response` → As is
/// - `StatusCode` → Empty body with that status
/// - `&'static str` / `String` / `Bytes` → `200 OK` with a plain-text body
/// - `(StatusCode, T)` → `T`'s response with the status replaced
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `IntoResponse`",
    label = "missing `IntoResponse` implementation",
    note = "IntoResponse must implement the `into_response` method."
)]
pub trait IntoResponse {
    /// Convert the output into a response.
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::new());
        *response.status_mut() = self;
        response
    }
}

impl IntoResponse for Bytes {
    fn into_response(self) -> Response {
        let mut response = Response::new(self);
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        response
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        Bytes::from_static(self.as_bytes()).into_response()
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        Bytes::from(self).into_response()
    }
}

impl<T: IntoResponse> IntoResponse for (StatusCode, T) {
    fn into_response(self) -> Response {
        let mut response = self.1.into_response();
        *response.status_mut() = self.0;
        response
    }
}

/// The default `404 Not Found` response.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found\n").into_response()
}

/// `405 Method Not Allowed` with an empty body.
pub fn method_not_allowed() -> Response {
    StatusCode::METHOD_NOT_ALLOWED.into_response()
}

/// `500 Internal Server Error` with an empty body.
pub fn internal_error() -> Response {
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// `503 Service Unavailable` with an empty body.
pub fn service_unavailable() -> Response {
    StatusCode::SERVICE_UNAVAILABLE.into_response()
}
