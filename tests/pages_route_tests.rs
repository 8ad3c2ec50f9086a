mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{RecordingMailer, TestApp, body_string, get};
use std::sync::Arc;

async fn app(tag: &str) -> TestApp {
    TestApp::spawn(tag, Arc::new(RecordingMailer::default())).await
}

#[tokio::test]
async fn static_pages_render() {
    let app = app("pages").await;

    for uri in ["/", "/about", "/products", "/factory", "/contact"] {
        let resp = app.send(get(uri)).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
        let body = body_string(resp).await;
        assert!(body.contains("<html"), "GET {uri} should be an html page");
    }
}

#[tokio::test]
async fn products_page_lists_whole_catalog() {
    let app = app("products").await;

    let body = body_string(app.send(get("/products")).await).await;
    for product in loonges::catalog::all() {
        assert!(body.contains(product.name), "{} missing", product.name);
        assert!(body.contains(&format!("/product/{}", product.id)));
    }
}

#[tokio::test]
async fn unknown_product_falls_back_to_default_entry() {
    let app = app("product-fallback").await;

    let known = app.send(get("/product/1")).await;
    assert_eq!(known.status(), StatusCode::OK);
    let known = body_string(known).await;

    let unknown = app.send(get("/product/999")).await;
    assert_eq!(unknown.status(), StatusCode::OK);
    let unknown = body_string(unknown).await;

    assert_eq!(known, unknown);
    assert!(known.contains(loonges::catalog::DEFAULT_PRODUCT.name));

    let third = body_string(app.send(get("/product/3")).await).await;
    assert!(third.contains(loonges::catalog::find(3).name));
    assert_ne!(third, known);
}

#[tokio::test]
async fn non_integer_product_id_is_not_found() {
    let app = app("product-bad-id").await;
    for uri in ["/product/abc", "/product/-1", "/product/1.5"] {
        let resp = app.send(get(uri)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {uri}");
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = app("not-found").await;
    let resp = app.send(get("/nope")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let app = app("request-id").await;

    let resp = app
        .send(
            Request::builder()
                .uri("/about")
                .header("x-request-id", "trace-me-123")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await;
    assert_eq!(resp.headers()["x-request-id"], "trace-me-123");

    let resp = app.send(get("/about")).await;
    let generated = resp.headers()["x-request-id"]
        .to_str()
        .expect("ascii request id");
    assert_eq!(generated.len(), 16);
}

#[tokio::test]
async fn static_assets_are_served() {
    let app = app("static").await;

    let resp = app.send(get("/static/js/main.js")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("mobile-menu-toggle"));

    let resp = app.send(get("/static/js/missing.js")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
