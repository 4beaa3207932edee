//! Shared helpers for HTTP integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt; // For `oneshot` method

use shop_service::config::AppConfig;
use shop_service::infrastructure::database::migrator::Migrator;
use shop_service::server::build_app_state;
use shop_service::{create_router, AppState};

pub const ADMIN_EMAIL: &str = "admin@shop.test";
pub const ADMIN_PASSWORD: &str = "admin-password";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Router over a fresh, migrated in-memory database.
pub async fn spawn_app() -> TestApp {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let mut config = AppConfig::default();
    config.security.jwt_secret = "test-secret".to_string();
    config.security.bcrypt_cost = 4;

    let metrics = PrometheusBuilder::new().build_recorder().handle();
    let state = build_app_state(db, &config, metrics);
    let router = create_router(state.clone());

    TestApp { router, state }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Seeds the default admin (only works on an empty users table) and logs in.
    pub async fn admin_token(&self) -> String {
        self.state
            .user_service
            .ensure_default_admin("Admin", ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap();
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> i32 {
        let (status, body) = self
            .request(
                "POST",
                "/users",
                Some(json!({"name": name, "email": email, "password": password})),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap() as i32
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/auth/login",
                Some(json!({"email": email, "password": password})),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    pub async fn create_product(&self, token: &str, name: &str, price: i32) -> i32 {
        let (status, body) = self
            .request(
                "POST",
                "/products",
                Some(json!({"name": name, "price": price})),
                Some(token),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap() as i32
    }
}
