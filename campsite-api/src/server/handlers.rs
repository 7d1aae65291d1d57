// HTTP request handlers
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::ContentError;
use crate::server::state::AppState;

type JsonResult<T> = Result<Json<T>, ContentError>;

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(state.content.root())
}

pub async fn camping(State(state): State<AppState>) -> JsonResult<Value> {
    Ok(Json(state.content.camping().await?))
}

pub async fn fishing(State(state): State<AppState>) -> JsonResult<Value> {
    Ok(Json(state.content.fishing().await?))
}

pub async fn contact(State(state): State<AppState>) -> JsonResult<Value> {
    Ok(Json(state.content.contact().await?))
}

pub async fn rules(State(state): State<AppState>) -> JsonResult<Vec<Value>> {
    Ok(Json(state.content.rules().await?))
}

pub async fn gallery(State(state): State<AppState>) -> JsonResult<Vec<Value>> {
    Ok(Json(state.content.gallery(None).await?))
}

pub async fn gallery_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> JsonResult<Vec<Value>> {
    Ok(Json(state.content.gallery(Some(&category)).await?))
}

/// Health check endpoint, 503 when the store does not answer
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.content.health().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "detail": "Store unavailable" })),
            )
        }
    }
}
