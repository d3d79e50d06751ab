//! Static status endpoints and readiness

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::DocumentStore;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

pub const ROOT_MESSAGE: &str = "Lobster Air Tawar Backend siap!";
pub const HELLO_MESSAGE: &str = "Halo dari backend lobster!";

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Liveness message
#[utoipa::path(
    get,
    path = "/",
    tag = "Status",
    responses((status = 200, description = "Backend is up", body = MessageResponse))
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

/// Static greeting
#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "Status",
    responses((status = 200, description = "Greeting", body = MessageResponse))
)]
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: HELLO_MESSAGE.to_string(),
    })
}

/// 200 when the document store answers a ping, 503 otherwise
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Status",
    responses(
        (status = 200, description = "All dependencies reachable"),
        (status = 503, description = "A dependency is unreachable")
    )
)]
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store;
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async move { store.ping().await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}

pub fn root_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/ready", get(ready))
        .with_state(state)
}

pub fn api_router() -> Router {
    Router::new().route("/hello", get(hello))
}
