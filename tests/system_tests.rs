//! Integration tests for health probes, reports and the metrics endpoint.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::TestApp;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_live() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/api/system/health/live", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["success"].as_bool().unwrap_or(false));
    assert_eq!(body["data"]["status"], "alive");
}

#[tokio::test]
async fn test_health_ready() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/api/system/health/ready", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ready"], true);
    assert_eq!(body["data"]["checks"]["database"], true);
    assert!(body["data"]["uptimeSeconds"].is_u64());
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let app = TestApp::spawn().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::spawn().await;

    let (status, _) = app.get("/api/nothing-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_report_summary_counts() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;
    let user = app.user_token("a@x.com").await;
    let product_id = app.seed_product(&admin).await;

    let (_, first) = app.create_review(&user, product_id, 5).await;
    let (_, second) = app.create_review(&user, product_id, 1).await;
    app.create_review(&user, product_id, 3).await;

    let first_id = first["data"]["id"].as_i64().unwrap();
    let second_id = second["data"]["id"].as_i64().unwrap();
    app.request(
        "PUT",
        &format!("/api/reviews/{first_id}/approve"),
        Some(&admin),
        None,
    )
    .await;
    app.request(
        "PUT",
        &format!("/api/reviews/{second_id}/reject"),
        Some(&admin),
        None,
    )
    .await;

    let (status, body) = app.get("/api/reports/summary", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let summary = &body["data"];
    assert_eq!(summary["users"], 2);
    assert_eq!(summary["products"], 1);
    assert_eq!(summary["categories"], 1);
    assert_eq!(summary["reviews"]["total"], 3);
    assert_eq!(summary["reviews"]["pending"], 1);
    assert_eq!(summary["reviews"]["approved"], 1);
    assert_eq!(summary["reviews"]["rejected"], 1);
}

#[tokio::test]
async fn test_report_lists_latest_ten_logs_newest_first() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;

    for i in 0..12 {
        let (status, _) = app.create_category(&admin, &format!("Category {i}")).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get("/api/reports/summary", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let logs = body["data"]["lastLogs"].as_array().unwrap();
    assert_eq!(logs.len(), 10);
    assert_eq!(logs[0]["action"], "CreateCategory");
    assert!(logs[0]["userId"].as_i64().is_some());

    let ids: Vec<i64> = logs.iter().map(|l| l["id"].as_i64().unwrap()).collect();
    assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));
}

#[tokio::test]
async fn test_report_summary_requires_admin() {
    let app = TestApp::spawn().await;

    let (status, _) = app.get("/api/reports/summary", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_metrics_endpoint_access() {
    let app = TestApp::spawn().await;

    let (status, _) = app.get("/api/metrics", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = app.user_token("a@x.com").await;
    let (status, _) = app.get("/api/metrics", Some(&user)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // No recorder installed in tests
    let admin = app.admin_token().await;
    let (status, _) = app.get("/api/metrics", Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
