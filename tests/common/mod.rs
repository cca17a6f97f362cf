//! Shared harness for the integration tests: a router over a throwaway
//! SQLite file plus helpers for the usual request shapes.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use cosmorate::config::Config;
use cosmorate::state::SharedState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const ADMIN_EMAIL: &str = "admin@test.local";
pub const ADMIN_PASSWORD: &str = "admin-pass";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<SharedState>,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

pub fn test_config(db_path: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.bootstrap.enabled = false;
    // Cheap hashing keeps the suite fast
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_path =
            std::env::temp_dir().join(format!("cosmorate-test-{}.db", uuid::Uuid::new_v4()));

        let config = test_config(&db_path);
        let shared = Arc::new(
            SharedState::new(config)
                .await
                .expect("Failed to create shared state"),
        );

        shared
            .auth_service
            .create_admin(ADMIN_EMAIL, "admin", ADMIN_PASSWORD)
            .await
            .expect("Failed to create admin");

        let state = cosmorate::api::create_app_state(shared.clone(), None);

        Self {
            router: cosmorate::api::router(state),
            state: shared,
            db_path,
        }
    }

    /// Sends a request and returns the status with the parsed body
    /// (`Value::Null` for an empty body).
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("GET", uri, token, None).await
    }

    pub async fn register(&self, email: &str, password: &str, username: &str) -> (StatusCode, Value) {
        self.request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "email": email, "password": password, "username": username })),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn token_for(&self, email: &str, password: &str) -> String {
        let (status, body) = self.login(email, password).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.token_for(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Registers a fresh `User` account and logs it in.
    pub async fn user_token(&self, email: &str) -> String {
        let username = email.split('@').next().unwrap_or("user");
        let (status, body) = self.register(email, "secret1", username).await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        self.token_for(email, "secret1").await
    }

    pub async fn create_category(&self, token: &str, name: &str) -> (StatusCode, Value) {
        self.request(
            "POST",
            "/api/categories",
            Some(token),
            Some(json!({ "name": name })),
        )
        .await
    }

    pub async fn create_product(
        &self,
        token: &str,
        category_id: i64,
        name: &str,
    ) -> (StatusCode, Value) {
        self.request(
            "POST",
            "/api/products",
            Some(token),
            Some(json!({ "name": name, "brand": "Acme", "categoryId": category_id })),
        )
        .await
    }

    /// Admin-created category and product; returns the product id.
    pub async fn seed_product(&self, admin: &str) -> i64 {
        let (status, category) = self.create_category(admin, "Skincare").await;
        assert_eq!(status, StatusCode::CREATED, "{category}");
        let category_id = category["data"]["id"].as_i64().unwrap();

        let (status, product) = self.create_product(admin, category_id, "Hydra Cream").await;
        assert_eq!(status, StatusCode::CREATED, "{product}");
        product["data"]["id"].as_i64().unwrap()
    }

    pub async fn create_review(
        &self,
        token: &str,
        product_id: i64,
        rating: i64,
    ) -> (StatusCode, Value) {
        self.request(
            "POST",
            "/api/reviews",
            Some(token),
            Some(json!({
                "productId": product_id,
                "rating": rating,
                "title": "Great",
                "body": "Nice"
            })),
        )
        .await
    }

    /// Audit rows newest first.
    pub async fn audit_log(&self) -> Vec<cosmorate::db::AuditLogEntry> {
        self.state.store.latest_logs(1000).await.unwrap()
    }
}
