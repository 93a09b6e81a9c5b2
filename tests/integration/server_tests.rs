//! HTTP-level tests of the bundled axum server.
//!
//! Tests drive the full router with `tower::ServiceExt::oneshot`, covering
//! the materialize-then-redirect flow, static hits after materialization,
//! and JSON error responses.

use axum::body::Body;
use axum::http::{header, Request, StatusCode, Uri};
use http_body_util::BodyExt;
use tower::ServiceExt;

use pixelgate::{create_router, MiddlewareBuilder, ServerMiddleware};

use super::test_utils::FixtureTree;

fn build_server_middleware(tree: &FixtureTree, resolutions: &[i32]) -> ServerMiddleware {
    MiddlewareBuilder::<Uri>::new(&tree.source_root, &tree.public_root)
        .allowed_extensions(vec!["jpg".to_string(), "png".to_string()])
        .unwrap()
        .allowed_resolutions(resolutions.to_vec())
        .unwrap()
        .request_path(|uri: &Uri| Some(uri.path().to_string()))
        .build()
        .unwrap()
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let tree = FixtureTree::new();
    let router = create_router(build_server_middleware(&tree, &[-1, 128]), false);

    let response = router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "ok");
}

#[tokio::test]
async fn test_miss_materializes_and_redirects() {
    let tree = FixtureTree::new();
    tree.write_source_image("trains/test.jpg", 256, 128);
    let router = create_router(build_server_middleware(&tree, &[-1, 128]), false);

    let response = router
        .clone()
        .oneshot(get("/trains/128x0/test.jpg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/trains/128x0/test.jpg"
    );
    assert!(tree.public_path("trains/128x0/test.jpg").exists());

    // Following the redirect now hits the static file service.
    let response = router
        .oneshot(get("/trains/128x0/test.jpg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let served = image::load_from_memory(&body).unwrap();
    assert_eq!((served.width(), served.height()), (128, 64));
}

#[tokio::test]
async fn test_copy_flow_for_zero_segment() {
    let tree = FixtureTree::new();
    tree.write_source_image("gallery/pic.png", 33, 21);
    let router = create_router(build_server_middleware(&tree, &[-1]), false);

    let response = router
        .clone()
        .oneshot(get("/gallery/0x0/pic.png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);

    let original = std::fs::read(tree.source_root.join("gallery/pic.png")).unwrap();
    let copied = std::fs::read(tree.public_path("gallery/0x0/pic.png")).unwrap();
    assert_eq!(original, copied);
}

#[tokio::test]
async fn test_unsupported_extension_is_500_json() {
    let tree = FixtureTree::new();
    let router = create_router(build_server_middleware(&tree, &[-1, 128]), false);

    let response = router
        .oneshot(get("/trains/128x128/clip.gif"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "UNSUPPORTED_EXTENSION");
    assert!(error["message"].is_string());
}

#[tokio::test]
async fn test_unsupported_resolution_is_500_json() {
    let tree = FixtureTree::new();
    tree.write_source_image("trains/test.jpg", 64, 64);
    let router = create_router(build_server_middleware(&tree, &[-1, 128]), false);

    let response = router
        .oneshot(get("/trains/99x99/test.jpg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "UNSUPPORTED_RESOLUTION");
}

#[tokio::test]
async fn test_existing_asset_served_without_middleware() {
    let tree = FixtureTree::new();
    // Pre-materialized file, no corresponding source: a static hit must not
    // consult the middleware at all.
    let dest = tree.public_path("direct/photo.jpg");
    std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
    super::test_utils::test_image(10, 10).save(&dest).unwrap();

    let router = create_router(build_server_middleware(&tree, &[-1, 128]), false);

    let response = router.oneshot(get("/direct/photo.jpg")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );
}

#[tokio::test]
async fn test_repeated_requests_stay_consistent() {
    let tree = FixtureTree::new();
    tree.write_source_image("a/img.jpg", 256, 256);
    let router = create_router(build_server_middleware(&tree, &[-1, 128]), false);

    // Unguarded concurrent materialization of the same destination: both
    // requests run the full pipeline and both respond 302.
    let (first, second) = tokio::join!(
        router.clone().oneshot(get("/a/128x128/img.jpg")),
        router.clone().oneshot(get("/a/128x128/img.jpg")),
    );
    assert_eq!(first.unwrap().status(), StatusCode::FOUND);
    assert_eq!(second.unwrap().status(), StatusCode::FOUND);

    let materialized = image::open(tree.public_path("a/128x128/img.jpg")).unwrap();
    assert_eq!((materialized.width(), materialized.height()), (128, 128));
}
