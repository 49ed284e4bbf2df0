//! Feedback endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use crate::handlers::{ApiJson, ApiPath, ApiQuery, ApiResult, AppState};
use crate::utils::errors::CampusEventsError;
use crate::models::feedback::{Feedback, FeedbackSummary, CreateFeedbackRequest};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_feedback).post(submit_feedback))
        .route("/check", get(has_submitted))
        .route("/event/:event_id", get(feedback_for_event))
        .route("/event/:event_id/summary", get(event_summary))
        .route("/event/:event_id/average", get(average_rating))
        .route("/student/:student_id", get(feedback_for_student))
        .route("/:id", get(get_feedback))
}

#[derive(Debug, Deserialize)]
pub struct PairQuery {
    pub event_id: i64,
    pub student_id: i64,
}

#[derive(Debug, Serialize)]
pub struct SubmissionStatus {
    pub event_id: i64,
    pub student_id: i64,
    pub has_submitted: bool,
}

#[derive(Debug, Serialize)]
pub struct AverageRating {
    pub event_id: i64,
    pub average_rating: f64,
}

async fn list_feedback(State(state): State<AppState>) -> ApiResult<Json<Vec<Feedback>>> {
    Ok(Json(state.services.feedback_service.list_feedback().await?))
}

async fn submit_feedback(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateFeedbackRequest>,
) -> ApiResult<(StatusCode, Json<Feedback>)> {
    let feedback = state.services.feedback_service.submit_feedback(request).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

async fn get_feedback(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Feedback>> {
    state
        .services
        .feedback_service
        .get_feedback(id)
        .await?
        .map(Json)
        .ok_or_else(|| CampusEventsError::FeedbackNotFound { feedback_id: id }.into())
}

async fn feedback_for_event(State(state): State<AppState>, ApiPath(event_id): ApiPath<i64>) -> ApiResult<Json<Vec<Feedback>>> {
    Ok(Json(state.services.feedback_service.feedback_for_event(event_id).await?))
}

async fn feedback_for_student(
    State(state): State<AppState>,
    ApiPath(student_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<Feedback>>> {
    Ok(Json(state.services.feedback_service.feedback_for_student(student_id).await?))
}

async fn event_summary(State(state): State<AppState>, ApiPath(event_id): ApiPath<i64>) -> ApiResult<Json<FeedbackSummary>> {
    Ok(Json(state.services.feedback_service.event_summary(event_id).await?))
}

async fn average_rating(State(state): State<AppState>, ApiPath(event_id): ApiPath<i64>) -> ApiResult<Json<AverageRating>> {
    let average_rating = state.services.feedback_service.average_rating(event_id).await?;
    Ok(Json(AverageRating { event_id, average_rating }))
}

async fn has_submitted(State(state): State<AppState>, ApiQuery(pair): ApiQuery<PairQuery>) -> ApiResult<Json<SubmissionStatus>> {
    let has_submitted = state
        .services
        .feedback_service
        .has_submitted(pair.event_id, pair.student_id)
        .await?;
    Ok(Json(SubmissionStatus {
        event_id: pair.event_id,
        student_id: pair.student_id,
        has_submitted,
    }))
}
