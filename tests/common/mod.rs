use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

use macrolog::app::build_app;
use macrolog::auth::repo_types::{ApprovalStatus, User};
use macrolog::auth::services::ensure_admin;
use macrolog::config::{AdminConfig, AppConfig, JwtConfig};
use macrolog::state::{run_migrations, AppState};

#[allow(dead_code)]
pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        jwt: JwtConfig {
            secret: "integration-test-secret".into(),
            issuer: "macrolog".into(),
            audience: "macrolog-users".into(),
            ttl_minutes: 60,
        },
        admin: AdminConfig {
            username: "admin".into(),
            email: "admin@example.com".into(),
            password: "admin123".into(),
        },
    }
}

/// In-memory database with the schema applied. A single connection,
/// because every pooled `:memory:` connection is its own empty database.
#[allow(dead_code)]
pub async fn test_db() -> SqlitePool {
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");
    run_migrations(&db).await.expect("apply schema");
    db
}

/// A full application over an in-memory database, plus the state for
/// tests that need to reach into the database directly.
#[allow(dead_code)]
pub async fn test_app() -> (Router, AppState) {
    let db = test_db().await;
    let state = AppState::from_parts(db, Arc::new(test_config()));
    (build_app(state.clone()), state)
}

/// Drives one request through the router and decodes the JSON body
/// (`Value::Null` for empty or non-JSON bodies).
#[allow(dead_code)]
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    };

    let response = app.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    request(app, "GET", uri, token, None).await
}

#[allow(dead_code)]
pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    request(app, "POST", uri, token, Some(body)).await
}

#[allow(dead_code)]
pub async fn put_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    request(app, "PUT", uri, token, Some(body)).await
}

#[allow(dead_code)]
pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    request(app, "DELETE", uri, token, None).await
}

#[allow(dead_code)]
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = post_json(
        app,
        "/auth/login",
        None,
        json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token in response").to_string()
}

/// Signs a user up and logs them in without approving them.
#[allow(dead_code)]
pub async fn pending_user(app: &Router, name: &str) -> (String, Uuid) {
    let email = format!("{name}@example.com");
    let (status, body) = post_json(
        app,
        "/auth/signup",
        None,
        json!({ "username": name, "email": email, "password": "password123" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    let id: Uuid = body["user"]["id"]
        .as_str()
        .expect("user id in response")
        .parse()
        .expect("uuid");

    let token = login(app, &email, "password123").await;
    (token, id)
}

/// Signs a user up, approves them directly in the database, and logs
/// them in. Returns the bearer token and the user id.
#[allow(dead_code)]
pub async fn approved_user(app: &Router, state: &AppState, name: &str) -> (String, Uuid) {
    let (token, id) = pending_user(app, name).await;
    User::set_status(&state.db, id, ApprovalStatus::Approved)
        .await
        .expect("approve user")
        .expect("user exists");
    (token, id)
}

/// Bootstraps the admin account and logs it in.
#[allow(dead_code)]
pub async fn admin_token(app: &Router, state: &AppState) -> String {
    ensure_admin(&state.db, &state.config.admin)
        .await
        .expect("bootstrap admin");
    login(app, &state.config.admin.email, &state.config.admin.password).await
}

#[allow(dead_code)]
pub async fn create_product(app: &Router, token: &str, name: &str, calories: f64) -> Uuid {
    let (status, body) = post_json(
        app,
        "/products",
        Some(token),
        json!({ "name": name, "calories_per_100g": calories }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "product create failed: {body}");
    body["id"].as_str().expect("product id").parse().expect("uuid")
}

#[allow(dead_code)]
pub async fn create_meal(app: &Router, token: &str, name: &str, date: &str) -> Uuid {
    let (status, body) = post_json(
        app,
        "/meals",
        Some(token),
        json!({ "name": name, "date": date }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "meal create failed: {body}");
    body["id"].as_str().expect("meal id").parse().expect("uuid")
}

#[allow(dead_code)]
pub async fn log_consumption(
    app: &Router,
    token: &str,
    meal_id: Uuid,
    product_id: Uuid,
    quantity_g: f64,
) -> Value {
    let (status, body) = post_json(
        app,
        "/consumptions",
        Some(token),
        json!({ "meal_id": meal_id, "product_id": product_id, "quantity_g": quantity_g }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "consumption failed: {body}");
    body
}
