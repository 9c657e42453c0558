//! HTTP surface tests.
//!
//! These tests drive the router with axum-test while the feed sources are
//! served by a mock server.

mod common;

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::Value;
use wiremock::MockServer;

use common::*;
use showcase::config::Config;
use showcase::feed::BodyFormat;
use showcase::render::{EMPTY_MESSAGE, LOADING_MESSAGE, PRODUCT_ITEM_CLASS};
use showcase::web::handlers::AppState;
use showcase::web::router::{create_health_router, create_router};

/// Create a test server for the given configuration.
fn create_test_server(config: Config) -> TestServer {
    let cors_origins = config.server.cors_origins.clone();
    let app_state = Arc::new(AppState::new(config, http_transport()));
    let router = create_router(app_state, &cors_origins).merge(create_health_router());

    TestServer::new(router).expect("Failed to create test server")
}

async fn live_feed_server() -> (MockServer, Config) {
    let server = start_feed_server().await;
    mount(&server, "/raw", body(200, RSS_FEED), 1).await;
    let config = create_test_config(vec![source(&server, "/raw", BodyFormat::Xml)]);
    (server, config)
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(create_test_config(vec![]));

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_landing_page() {
    let (_feed, config) = live_feed_server().await;
    let server = create_test_server(config);

    let response = server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<div id="product-list" class="product-list">"#));
    assert_eq!(html.matches(&format!(r#"class="{PRODUCT_ITEM_CLASS}""#)).count(), 3);
    assert!(html.contains("data-animation-directives"));
    assert!(html.contains("&quot;kind&quot;:&quot;entrance&quot;"));
    assert!(!html.contains(LOADING_MESSAGE));
    assert!(!html.contains("¥1,720"));
}

#[tokio::test]
async fn test_product_fragment() {
    let (_feed, config) = live_feed_server().await;
    let server = create_test_server(config);

    let response = server.get("/products").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.starts_with(r#"<a href="https://shop.example/items/124050080""#));
    assert!(!html.contains("<html"));
}

#[tokio::test]
async fn test_api_products_live() {
    let (_feed, config) = live_feed_server().await;
    let server = create_test_server(config);

    let response = server.get("/api/products").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["data"]["origin"]["kind"], "live");
    assert_eq!(json["data"]["count"], 3);
    assert_eq!(json["data"]["products"][0]["category"], "ETHIOPIA");
    assert_eq!(
        json["data"]["products"][0]["title"],
        "【エチオピア】モカ ゲイシャ G1 Natural 150g"
    );
}

#[tokio::test]
async fn test_api_products_fallback() {
    let feed = start_feed_server().await;
    mount(&feed, "/raw", body(503, "unavailable"), 1).await;
    let config = create_test_config(vec![source(&feed, "/raw", BodyFormat::Xml)]);
    let server = create_test_server(config);

    let response = server.get("/api/products").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["data"]["origin"]["kind"], "fallback");
    assert_eq!(json["data"]["count"], 3);
    assert_eq!(json["data"]["products"][2]["category"], "TANZANIA");
}

#[tokio::test]
async fn test_no_sources_empty_state() {
    let mut config = create_test_config(vec![]);
    config.display.on_exhaustion = showcase::ExhaustionBehavior::EmptyState;
    let server = create_test_server(config);

    let response = server.get("/products").await;
    response.assert_status_ok();
    assert!(response.text().contains(EMPTY_MESSAGE));
}

