//! End-to-end API tests over an in-memory SQLite database

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use metrics_exporter_prometheus::PrometheusBuilder;
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::Service;

use crm_backend::config::AppConfig;
use crm_backend::infrastructure::crypto::jwt::{JwtConfig, TokenIssuer};
use crm_backend::infrastructure::database::migrator::Migrator;
use crm_backend::server::build_app_state;
use crm_backend::{create_api_router, init_database, DatabaseConfig};

const SECRET: &str = "integration-secret";

fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.security.jwt_secret = SECRET.to_string();
    cfg.security.bcrypt_cost = 4;
    cfg
}

async fn app() -> Router {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let metrics = PrometheusBuilder::new().build_recorder().handle();
    create_api_router(build_app_state(&db, &test_config(), metrics))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, axum::http::HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .into_service()
        .call(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, json)
}

async fn register_and_login(app: &Router, username: &str, password: &str) -> (i64, String) {
    let (status, _, body) = send(
        app,
        "POST",
        "/actor",
        Some(json!({"username": username, "password": password})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, _, body) = send(
        app,
        "POST",
        "/actor/login",
        Some(json!({"username": username, "password": password})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    (id, body["data"]["token"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn register_applies_defaults_and_hides_hash() {
    let app = app().await;
    let (status, _, body) = send(
        &app,
        "POST",
        "/actor",
        Some(json!({
            "username": "john",
            "password": "password",
            "role_id": 1,
            "verified": true,
            "active": true
        })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["role_id"], 2);
    assert_eq!(body["data"]["verified"], false);
    assert_eq!(body["data"]["active"], false);
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
    assert!(body["response_time"].as_str().is_some());
}

#[tokio::test]
async fn login_returns_token_in_body_and_header() {
    let app = app().await;
    send(
        &app,
        "POST",
        "/actor",
        Some(json!({"username": "john", "password": "password"})),
        None,
    )
    .await;

    let (status, headers, body) = send(
        &app,
        "POST",
        "/actor/login",
        Some(json!({"username": "john", "password": "password"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap();
    assert!(!token.is_empty());
    assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), token);
    assert_eq!(body["data"]["expires_in"], 3600);
}

#[tokio::test]
async fn login_with_wrong_password_is_401() {
    let app = app().await;
    register_and_login(&app, "john", "password").await;

    let (status, headers, body) = send(
        &app,
        "POST",
        "/actor/login",
        Some(json!({"username": "john", "password": "wrong-password"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(headers.get(header::AUTHORIZATION).is_none());
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn protected_get_with_valid_token() {
    let app = app().await;
    let (id, token) = register_and_login(&app, "john", "password").await;

    let (status, _, body) = send(&app, "GET", &format!("/actor/{}", id), None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "john");
}

#[tokio::test]
async fn protected_get_without_or_with_bad_header_is_401() {
    let app = app().await;
    let (id, token) = register_and_login(&app, "john", "password").await;
    let uri = format!("/actor/{}", id);

    let (status, _, body) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let req = Request::builder()
        .uri(&uri)
        .header(header::AUTHORIZATION, token)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().into_service().call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_get_with_expired_token_is_401() {
    let app = app().await;
    let (id, _) = register_and_login(&app, "john", "password").await;
    let expired = expired_token("john");

    let (status, _, body) =
        send(&app, "GET", &format!("/actor/{}", id), None, Some(&expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
}

fn expired_token(username: &str) -> String {
    let issued = Utc::now() - Duration::hours(2);
    TokenIssuer::new(&JwtConfig::new(SECRET, 3600))
        .issue_at(username, 2, issued)
        .unwrap()
}

async fn assert_actor_untouched(app: &Router, id: i64, token: &str) {
    let (status, _, body) = send(app, "GET", &format!("/actor/{}", id), None, Some(token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "john");
    assert_eq!(body["data"]["active"], false);
    assert_eq!(body["data"]["role_id"], 2);
}

#[tokio::test]
async fn update_without_valid_token_is_401_and_changes_nothing() {
    let app = app().await;
    let (id, token) = register_and_login(&app, "john", "password").await;
    let uri = format!("/actor/{}", id);
    let body = json!({"username": "mallory", "active": true, "role_id": 1});
    let expired = expired_token("john");

    for credential in [None, Some(expired.as_str())] {
        let (status, _, resp) = send(&app, "PUT", &uri, Some(body.clone()), credential).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(resp["success"], false);
        assert_actor_untouched(&app, id, &token).await;
    }

    let (status, _, _) = send(
        &app,
        "POST",
        "/actor/login",
        Some(json!({"username": "john", "password": "password"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_without_valid_token_is_401_and_keeps_actor() {
    let app = app().await;
    let (id, token) = register_and_login(&app, "john", "password").await;
    let expired = expired_token("john");

    for credential in [None, Some(expired.as_str())] {
        let (status, _, resp) = send(&app, "DELETE", "/actor/john", None, credential).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(resp["success"], false);
        assert_actor_untouched(&app, id, &token).await;
    }
}

#[tokio::test]
async fn duplicate_username_is_409() {
    let app = app().await;
    register_and_login(&app, "john", "password").await;

    let (status, _, body) = send(
        &app,
        "POST",
        "/actor",
        Some(json!({"username": "john", "password": "password"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_and_non_numeric_ids() {
    let app = app().await;
    let (_, token) = register_and_login(&app, "john", "password").await;

    let (status, _, _) = send(&app, "GET", "/actor/999", None, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, "GET", "/actor/abc", None, Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(&app, "GET", "/customer/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_password_then_login_with_it() {
    let app = app().await;
    let (id, token) = register_and_login(&app, "john", "password").await;

    let (status, _, body) = send(
        &app,
        "PUT",
        &format!("/actor/{}", id),
        Some(json!({"password": "new-password", "active": true})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["active"], true);

    let (status, _, _) = send(
        &app,
        "POST",
        "/actor/login",
        Some(json!({"username": "john", "password": "new-password"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_actor_by_username() {
    let app = app().await;
    let (id, token) = register_and_login(&app, "john", "password").await;

    let (status, _, body) = send(&app, "DELETE", "/actor/john", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _, _) = send(&app, "GET", &format!("/actor/{}", id), None, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, "DELETE", "/actor/john", None, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn customer_crud_without_auth() {
    let app = app().await;

    let (status, _, body) = send(
        &app,
        "POST",
        "/customer",
        Some(json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@example.com",
            "avatar": "https://example.com/jane.png"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_i64().unwrap();
    let uri = format!("/customer/{}", id);

    let (status, _, body) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "jane@example.com");

    let (status, _, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({"last_name": "Smith"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["last_name"], "Smith");
    assert_eq!(body["data"]["first_name"], "Jane");

    let (status, _, _) = send(&app, "DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn invalid_bodies_are_400() {
    let app = app().await;

    let (status, _, _) = send(
        &app,
        "POST",
        "/customer",
        Some(json!({"first_name": "Jane", "email": "not-an-email"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = send(
        &app,
        "POST",
        "/actor",
        Some(json!({"username": "jo", "password": "password"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn responses_carry_request_id_and_docs_are_served() {
    let app = app().await;

    let (status, headers, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"]["status"], "ok");
    assert!(headers.get("x-request-id").is_some());

    let (status, _, spec) = send(&app, "GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(spec["paths"].get("/actor/login").is_some());
}
