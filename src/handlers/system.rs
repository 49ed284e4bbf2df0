//! Health and statistics endpoints

use axum::{extract::State, http::StatusCode, Json};
use crate::handlers::{ApiResult, AppState};
use crate::services::{ServiceHealthStatus, SystemStats};

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ServiceHealthStatus>) {
    let status = state.services.health_check().await;
    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<SystemStats>> {
    Ok(Json(state.services.statistics().await?))
}
