#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use shipyard_api::config::ServerConfig;
use shipyard_api::router::build_app_router;
use shipyard_api::state::AppState;
use shipyard_core::rules::Rules;
use shipyard_core::tech::TechLevel;
use shipyard_core::techs::TechStore;
use shipyard_db::models::player::CreatePlayer;
use shipyard_db::repositories::PlayerRepo;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        techs_file: None,
    }
}

/// Build the full application router, middleware included, on top of the
/// given pool and the built-in tech catalog.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        techs: Arc::new(TechStore::standard()),
        rules: Arc::new(Rules::default()),
    };
    build_app_router(state, &config)
}

/// Insert a player so designs have an owner.
pub async fn seed_player(pool: &PgPool, game_id: i64, num: i32, tech_levels: TechLevel) {
    PlayerRepo::create(
        pool,
        &CreatePlayer {
            game_id,
            num,
            name: format!("Player {num}"),
            tech_levels,
            race_spec: None,
            friends: Vec::new(),
        },
    )
    .await
    .unwrap();
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}
