//! Registration endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use crate::handlers::{ApiJson, ApiPath, ApiResult, AppState};
use crate::utils::errors::CampusEventsError;
use crate::models::registration::{Registration, CreateRegistrationRequest, UpdateRegistrationStatusRequest};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_registrations).post(register))
        .route("/event/:event_id", get(registrations_for_event))
        .route("/student/:student_id", get(registrations_for_student))
        .route("/:id", get(get_registration).delete(cancel_registration))
        .route("/:id/status", put(update_status))
        .route("/:id/check-in", post(check_in))
}

async fn list_registrations(State(state): State<AppState>) -> ApiResult<Json<Vec<Registration>>> {
    Ok(Json(state.services.registration_service.list_registrations().await?))
}

async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateRegistrationRequest>,
) -> ApiResult<(StatusCode, Json<Registration>)> {
    let registration = state.services.registration_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

async fn get_registration(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Registration>> {
    state
        .services
        .registration_service
        .get_registration(id)
        .await?
        .map(Json)
        .ok_or_else(|| CampusEventsError::RegistrationNotFound { registration_id: id }.into())
}

async fn cancel_registration(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<StatusCode> {
    if state.services.registration_service.cancel_registration(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CampusEventsError::RegistrationNotFound { registration_id: id }.into())
    }
}

async fn registrations_for_event(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<Registration>>> {
    Ok(Json(state.services.registration_service.registrations_for_event(event_id).await?))
}

async fn registrations_for_student(
    State(state): State<AppState>,
    ApiPath(student_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<Registration>>> {
    Ok(Json(state.services.registration_service.registrations_for_student(student_id).await?))
}

async fn update_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateRegistrationStatusRequest>,
) -> ApiResult<Json<Registration>> {
    state
        .services
        .registration_service
        .update_status(id, request.status)
        .await?
        .map(Json)
        .ok_or_else(|| CampusEventsError::RegistrationNotFound { registration_id: id }.into())
}

async fn check_in(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Registration>> {
    state
        .services
        .registration_service
        .check_in(id)
        .await?
        .map(Json)
        .ok_or_else(|| CampusEventsError::RegistrationNotFound { registration_id: id }.into())
}
