use spindle::{
    ConfigError, Router, Routes,
    http::{Method, StatusCode},
    testing::{Journal, ParamsProbe, RecordingHandler, RecordingMiddleware},
};

mod common;
use common::{custom_not_found, get, route_path, send, text};

fn admin() -> Router {
    let admin = Router::new();
    admin.get("/", text("admin home")).unwrap();
    admin.get("/dashboard", route_path()).unwrap();
    admin
}

#[tokio::test]
async fn test_mount_forwards_stripped_path() {
    let root = Router::new();
    root.mount("/admin", &admin()).unwrap();

    let (status, body) = get(&root, "/admin/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "/dashboard");
}

#[tokio::test]
async fn test_bare_prefix_forwards_but_prefix_slash_is_not_found() {
    let root = Router::new();
    root.mount("/admin", &admin()).unwrap();

    assert_eq!(get(&root, "/admin").await, (StatusCode::OK, "admin home".into()));
    assert_eq!(get(&root, "/admin/").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mount_with_trailing_slash_pattern() {
    let root = Router::new();
    root.mount("/admin/", &admin()).unwrap();

    assert_eq!(get(&root, "/admin/dashboard").await.1, "/dashboard");
    assert_eq!(get(&root, "/admin").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sub_router_method_mismatch() {
    let root = Router::new();
    root.mount("/admin", &admin()).unwrap();

    assert_eq!(
        send(&root, Method::DELETE, "/admin/dashboard").await.0,
        StatusCode::METHOD_NOT_ALLOWED
    );
}

#[test]
fn test_duplicate_mount_rejected() {
    let root = Router::new();
    root.mount("/admin", &admin()).unwrap();

    assert_eq!(
        root.mount("/admin", &admin()),
        Err(ConfigError::DuplicateMount("/admin".into()))
    );
}

#[test]
fn test_mount_on_existing_wildcard_rejected() {
    let root = Router::new();
    root.get("/assets/*", text("asset")).unwrap();

    assert_eq!(
        root.mount_handler("/assets", text("other")),
        Err(ConfigError::DuplicateMount("/assets".into()))
    );
}

#[tokio::test]
async fn test_nested_mounts_keep_outer_params() {
    let root = Router::new();
    let probe = ParamsProbe::new();
    let probe_route = probe.clone();
    root.route("/orgs/{org}", move |org| {
        org.route("/repos", |repos| repos.get("/{repo}", probe_route))?;
        Ok(())
    })
    .unwrap();

    let (status, body) = get(&root, "/orgs/acme/repos/spindle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "org=acme&repo=spindle");

    let seen = probe.last().unwrap();
    assert_eq!(seen.route_path.as_deref(), Some("/spindle"));
    assert_eq!(seen.depth, 2);
    assert!(!seen.params.contains(spindle::WILDCARD));
}

#[tokio::test]
async fn test_sub_router_inherits_not_found() {
    let root = Router::new();
    root.not_found(custom_not_found());
    root.mount("/admin", &admin()).unwrap();

    assert_eq!(get(&root, "/admin/missing").await.1, "nothing here");
    assert_eq!(get(&root, "/admin/").await.1, "nothing here");
    assert_eq!(get(&root, "/missing").await.1, "nothing here");
}

#[tokio::test]
async fn test_sub_router_keeps_own_not_found() {
    let root = Router::new();
    root.not_found(custom_not_found());

    let sub = admin();
    sub.not_found(text("sub says no"));
    root.mount("/admin", &sub).unwrap();

    assert_eq!(get(&root, "/admin/missing").await.1, "sub says no");
}

#[tokio::test]
async fn test_mount_plain_handler() {
    let root = Router::new();
    root.mount_handler("/static", route_path()).unwrap();

    assert_eq!(get(&root, "/static/css/app.css").await.1, "/css/app.css");
    assert_eq!(get(&root, "/static").await.1, "/");
    assert_eq!(
        send(&root, Method::POST, "/static/upload").await.0,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_route_returns_populated_sub_router() {
    let root = Router::new();
    let api = root
        .route("/api", |api| api.get("/health", text("up")))
        .unwrap();

    assert!(!api.is_inline());
    assert_eq!(get(&root, "/api/health").await.1, "up");
    assert_eq!(get(&api, "/health").await.1, "up");
}

#[tokio::test]
async fn test_mounted_empty_router_answers_500() {
    let root = Router::new();
    root.mount("/empty", &Router::new()).unwrap();

    assert_eq!(
        get(&root, "/empty/anything").await.0,
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_mount_through_group_wraps_forwarding() {
    let journal = Journal::new();
    let sub = Router::new();
    sub.get("/", RecordingHandler::new("x", &journal)).unwrap();

    let root = Router::new();
    root.group(|g| {
        g.use_middleware(RecordingMiddleware::new("g", &journal))?;
        g.mount("/sub", &sub)
    })
    .unwrap();

    assert_eq!(get(&root, "/sub").await, (StatusCode::OK, "x".into()));
    assert_eq!(journal.entries(), ["g:before", "x", "g:after"]);

    journal.clear();
    assert_eq!(get(&root, "/sub/").await.0, StatusCode::NOT_FOUND);
    assert_eq!(journal.entries(), ["g:before", "g:after"]);
}

#[tokio::test]
async fn test_group_mount_uses_group_not_found() {
    let root = Router::new();
    root.not_found(custom_not_found());
    root.group(|g| g.mount("/admin", &admin())).unwrap();

    // The group has no override of its own, so nothing is inherited.
    assert_eq!(get(&root, "/admin/missing").await.1, "404 page not found\n");
    assert_eq!(get(&root, "/admin/").await.1, "404 page not found\n");
    assert_eq!(get(&root, "/missing").await.1, "nothing here");
}

#[tokio::test]
async fn test_group_mount_with_group_not_found() {
    let root = Router::new();
    root.group(|g| {
        g.not_found(custom_not_found());
        g.mount("/admin", &admin())
    })
    .unwrap();

    assert_eq!(get(&root, "/admin/missing").await.1, "nothing here");
    assert_eq!(get(&root, "/admin/").await.1, "nothing here");
    assert_eq!(get(&root, "/missing").await.0, StatusCode::NOT_FOUND);
}

#[test]
fn test_failed_mount_leaves_routes_unchanged() {
    let root = Router::new();
    root.get("/", text("home")).unwrap();

    assert!(matches!(
        root.mount("/files*", &admin()),
        Err(ConfigError::Pattern(_))
    ));
    let patterns: Vec<_> = root.routes().into_iter().map(|r| r.pattern).collect();
    assert_eq!(patterns, ["/"]);
}
