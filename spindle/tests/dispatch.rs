use spindle::{
    ConfigError, MethodSet, PatternError, Router,
    http::{Method, StatusCode},
    testing::{CountingHandler, ParamsProbe},
};

mod common;
use common::{custom_not_found, get, send, text};

#[tokio::test]
async fn test_static_routes_reach_their_handler() {
    let router = Router::new();
    let home = CountingHandler::new();
    let about = CountingHandler::new();
    let contact = CountingHandler::new();
    router.get("/", home.clone()).unwrap();
    router.get("/about", about.clone()).unwrap();
    router.post("/contact", contact.clone()).unwrap();

    assert_eq!(get(&router, "/about").await.0, StatusCode::OK);
    assert_eq!(send(&router, Method::POST, "/contact").await.0, StatusCode::OK);
    assert_eq!(get(&router, "/").await.0, StatusCode::OK);
    assert_eq!(get(&router, "/about").await.0, StatusCode::OK);

    assert_eq!(home.count(), 1);
    assert_eq!(about.count(), 2);
    assert_eq!(contact.count(), 1);
}

#[tokio::test]
async fn test_parameter_capture() {
    let router = Router::new();
    let probe = ParamsProbe::new();
    router.get("/users/{id}", probe.clone()).unwrap();

    let (status, body) = get(&router, "/users/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "id=42");

    let seen = probe.last().unwrap();
    assert_eq!(seen.params.get("id"), Some("42"));
    assert_eq!(seen.route_path, None);
}

#[tokio::test]
async fn test_wildcard_capture() {
    let router = Router::new();
    let probe = ParamsProbe::new();
    router.get("/files/*", probe.clone()).unwrap();

    get(&router, "/files/docs/readme.md").await;
    assert_eq!(
        probe.last().unwrap().params.get(spindle::WILDCARD),
        Some("docs/readme.md")
    );
}

#[tokio::test]
async fn test_method_mismatch_is_405_not_404() {
    let router = Router::new();
    router.get("/items", text("list")).unwrap();

    let (status, body) = send(&router, Method::POST, "/items").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_unsupported_method_is_405() {
    let router = Router::new();
    router.any("/items", text("anything")).unwrap();

    let brew = Method::from_bytes(b"BREW").unwrap();
    assert_eq!(
        send(&router, brew, "/items").await.0,
        StatusCode::METHOD_NOT_ALLOWED
    );
    // Unsupported even where no route exists.
    let brew = Method::from_bytes(b"BREW").unwrap();
    assert_eq!(
        send(&router, brew, "/nowhere").await.0,
        StatusCode::METHOD_NOT_ALLOWED
    );
}

#[tokio::test]
async fn test_unmatched_path_is_404() {
    let router = Router::new();
    router.get("/", text("home")).unwrap();

    let (status, body) = get(&router, "/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "404 page not found\n");
}

#[tokio::test]
async fn test_not_found_override() {
    let router = Router::new();
    router.get("/", text("home")).unwrap();
    router.not_found(custom_not_found());

    let (status, body) = get(&router, "/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "nothing here");
}

#[tokio::test]
async fn test_merged_methods_on_one_pattern() {
    let router = Router::new();
    router.get("/doc", text("read")).unwrap();
    router.put("/doc", text("write")).unwrap();
    router
        .handle(MethodSet::DELETE | MethodSet::PATCH, "/doc", text("change"))
        .unwrap();

    assert_eq!(get(&router, "/doc").await.1, "read");
    assert_eq!(send(&router, Method::PUT, "/doc").await.1, "write");
    assert_eq!(send(&router, Method::PATCH, "/doc").await.1, "change");
    assert_eq!(send(&router, Method::DELETE, "/doc").await.1, "change");
    assert_eq!(
        send(&router, Method::POST, "/doc").await.0,
        StatusCode::METHOD_NOT_ALLOWED
    );
}

#[tokio::test]
async fn test_serving_without_routes_fails() {
    let router = Router::new();
    let err = router.serve(common::request(Method::GET, "/")).await.unwrap_err();
    assert_eq!(err, ConfigError::NoRoutes);
}

#[test]
fn test_registration_errors() {
    let router = Router::new();
    assert_eq!(
        router.get("no-slash", text("x")),
        Err(ConfigError::InvalidPattern("no-slash".into()))
    );
    assert_eq!(
        router.get("/users/{}", text("x")),
        Err(ConfigError::Pattern(PatternError::EmptyParamName(
            "/users/{}".into()
        )))
    );
}

#[tokio::test]
async fn test_static_beats_param_beats_wildcard() {
    let router = Router::new();
    router.get("/posts/latest", text("static")).unwrap();
    router.get("/posts/{slug}", text("param")).unwrap();
    router.get("/posts/*", text("wildcard")).unwrap();

    assert_eq!(get(&router, "/posts/latest").await.1, "static");
    assert_eq!(get(&router, "/posts/hello").await.1, "param");
    assert_eq!(get(&router, "/posts/2024/01").await.1, "wildcard");
}
