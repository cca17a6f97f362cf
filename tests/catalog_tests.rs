//! Integration tests for category and product endpoints.

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_duplicate_category_name_is_rejected() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;

    let (status, body) = app.create_category(&admin, "Skincare").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Skincare");

    let (status, body) = app.create_category(&admin, "Skincare").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Category name already exist.");

    // Exact match only
    let (status, _) = app.create_category(&admin, "skincare").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_blank_category_name_is_rejected() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;

    let (status, _) = app.create_category(&admin, "   ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request("POST", "/api/categories", Some(&admin), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_category_reads_are_public() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;

    let (_, created) = app.create_category(&admin, "Haircare").await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = app.get("/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([{ "id": id, "name": "Haircare" }]));

    let (status, body) = app.get(&format!("/api/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Haircare");

    let (status, _) = app.get("/api/categories/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/categories/0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.get("/api/categories/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_category_mutations_require_admin() {
    let app = TestApp::spawn().await;

    let (status, _) = app
        .request("POST", "/api/categories", None, Some(json!({ "name": "X" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = app.user_token("a@x.com").await;
    let (status, _) = app
        .request("DELETE", "/api/categories/1", Some(&user), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_category() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;

    let (_, first) = app.create_category(&admin, "Skincare").await;
    let first_id = first["data"]["id"].as_i64().unwrap();
    app.create_category(&admin, "Makeup").await;

    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/categories/{first_id}"),
            Some(&admin),
            Some(json!({ "name": "Face care" })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (_, body) = app.get(&format!("/api/categories/{first_id}"), None).await;
    assert_eq!(body["data"]["name"], "Face care");

    // Renaming onto another category's name
    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/categories/{first_id}"),
            Some(&admin),
            Some(json!({ "name": "Makeup" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Keeping its own name is fine
    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/categories/{first_id}"),
            Some(&admin),
            Some(json!({ "name": "Face care" })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(
            "PUT",
            "/api/categories/999",
            Some(&admin),
            Some(json!({ "name": "Ghost" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A missing category is reported even when the name is taken
    let (status, _) = app
        .request(
            "PUT",
            "/api/categories/999",
            Some(&admin),
            Some(json!({ "name": "Makeup" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/categories/{first_id}"),
            Some(&admin),
            Some(json!({ "name": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_category_with_products_cannot_be_deleted() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;

    let product_id = app.seed_product(&admin).await;
    let (_, product) = app.get(&format!("/api/products/{product_id}"), None).await;
    let category_id = product["data"]["categoryId"].as_i64().unwrap();

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/categories/{category_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/products/{product_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/categories/{category_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/categories/{category_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_with_unknown_category_is_rejected() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;

    let (status, body) = app.create_product(&admin, 999, "Serum").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid categoryId - category does not exist.");

    let (_, products) = app.get("/api/products", None).await;
    assert_eq!(products["data"], json!([]));
}

#[tokio::test]
async fn test_product_validation() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;
    let (_, category) = app.create_category(&admin, "Skincare").await;
    let category_id = category["data"]["id"].as_i64().unwrap();

    for payload in [
        json!({ "name": "", "brand": "Acme", "categoryId": category_id }),
        json!({ "name": "Serum", "brand": " ", "categoryId": category_id }),
        json!({ "name": "x".repeat(101), "brand": "Acme", "categoryId": category_id }),
        json!({ "name": "Serum", "brand": "Acme", "categoryId": category_id, "imageUrl": "ftp://a" }),
        json!({ "name": "Serum", "brand": "Acme", "categoryId": category_id, "imageUrl": "https://" }),
        json!({ "name": "Serum", "brand": "Acme", "categoryId": category_id, "imageUrl": "http://exa mple .com/<x>" }),
    ] {
        let (status, _) = app
            .request("POST", "/api/products", Some(&admin), Some(payload))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (_, products) = app.get("/api/products", None).await;
    assert_eq!(products["data"], json!([]));
}

#[tokio::test]
async fn test_product_reads_include_category_name() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;
    let product_id = app.seed_product(&admin).await;

    let (status, body) = app.get("/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Hydra Cream");
    assert_eq!(items[0]["brand"], "Acme");
    assert_eq!(items[0]["category"], "Skincare");

    let (status, body) = app.get(&format!("/api/products/{product_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], product_id);
    assert_eq!(body["data"]["category"], "Skincare");
    assert!(body["data"]["categoryId"].as_i64().unwrap() > 0);

    let (status, _) = app.get("/api/products/4242", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_product() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;
    let product_id = app.seed_product(&admin).await;
    let (_, product) = app.get(&format!("/api/products/{product_id}"), None).await;
    let category_id = product["data"]["categoryId"].as_i64().unwrap();

    let uri = format!("/api/products/{product_id}");

    let (status, _) = app
        .request(
            "PUT",
            &uri,
            Some(&admin),
            Some(json!({
                "name": "Hydra Cream 2",
                "brand": "Acme",
                "categoryId": category_id,
                "imageUrl": "https://cdn.example.com/cream.jpg"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = app.get(&uri, None).await;
    assert_eq!(body["data"]["name"], "Hydra Cream 2");
    assert_eq!(body["data"]["imageUrl"], "https://cdn.example.com/cream.jpg");

    let (status, _) = app
        .request(
            "PUT",
            &uri,
            Some(&admin),
            Some(json!({ "name": "Hydra Cream", "brand": "Acme", "categoryId": 999 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            "PUT",
            "/api/products/999",
            Some(&admin),
            Some(json!({ "name": "Ghost", "brand": "Acme", "categoryId": category_id })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_product_removes_its_reviews() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;
    let user = app.user_token("a@x.com").await;
    let product_id = app.seed_product(&admin).await;

    let (status, _) = app.create_review(&user, product_id, 4).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/products/{product_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, mine) = app.get("/api/reviews/my", Some(&user)).await;
    assert_eq!(mine["data"], json!([]));

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/products/{product_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_mutations_are_audited() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;
    let product_id = app.seed_product(&admin).await;

    app.request(
        "DELETE",
        &format!("/api/products/{product_id}"),
        Some(&admin),
        None,
    )
    .await;

    let logs = app.audit_log().await;
    let actions: Vec<&str> = logs.iter().map(|l| l.action.as_str()).collect();

    assert!(actions.contains(&"CreateCategory"));
    assert!(actions.contains(&"CreateProduct"));
    assert!(actions.contains(&"DeleteProduct"));

    let delete = logs.iter().find(|l| l.action == "DeleteProduct").unwrap();
    assert_eq!(delete.details, format!("ProductId={product_id}"));
    assert!(delete.user_id.is_some());
}
