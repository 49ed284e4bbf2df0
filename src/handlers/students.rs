//! Student endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use crate::handlers::{ApiError, ApiJson, ApiPath, ApiQuery, ApiResult, AppState, SearchQuery};
use crate::utils::errors::CampusEventsError;
use crate::models::student::{Student, StudentProfile, CreateStudentRequest, UpdateStudentRequest};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route("/search", get(search_students))
        .route("/email-available", get(email_available))
        .route("/email/:email", get(get_student_by_email))
        .route("/department/:department", get(students_by_department))
        .route("/:id", get(get_student).put(update_student).delete(delete_student))
}

#[derive(Debug, Deserialize)]
pub struct EmailAvailableQuery {
    pub email: String,
    pub exclude_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct EmailAvailability {
    pub email: String,
    pub available: bool,
}

async fn list_students(State(state): State<AppState>) -> ApiResult<Json<Vec<Student>>> {
    Ok(Json(state.services.student_service.list_students().await?))
}

async fn create_student(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateStudentRequest>,
) -> ApiResult<(StatusCode, Json<Student>)> {
    let student = state.services.student_service.create_student(request).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

async fn get_student(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<StudentProfile>> {
    state
        .services
        .student_service
        .get_student_profile(id)
        .await?
        .map(Json)
        .ok_or_else(|| CampusEventsError::StudentNotFound { student_id: id }.into())
}

async fn get_student_by_email(State(state): State<AppState>, ApiPath(email): ApiPath<String>) -> ApiResult<Json<Student>> {
    match state.services.student_service.get_student_by_email(&email).await? {
        Some(student) => Ok(Json(student)),
        None => Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("Student with email {} not found", email),
        )),
    }
}

async fn update_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateStudentRequest>,
) -> ApiResult<Json<Student>> {
    state
        .services
        .student_service
        .update_student(id, request)
        .await?
        .map(Json)
        .ok_or_else(|| CampusEventsError::StudentNotFound { student_id: id }.into())
}

async fn delete_student(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<StatusCode> {
    if state.services.student_service.delete_student(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CampusEventsError::StudentNotFound { student_id: id }.into())
    }
}

async fn search_students(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ApiResult<Json<Vec<Student>>> {
    let term = query.q.unwrap_or_default();
    Ok(Json(state.services.student_service.search_students(&term).await?))
}

async fn students_by_department(
    State(state): State<AppState>,
    ApiPath(department): ApiPath<String>,
) -> ApiResult<Json<Vec<Student>>> {
    Ok(Json(state.services.student_service.students_by_department(&department).await?))
}

async fn email_available(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<EmailAvailableQuery>,
) -> ApiResult<Json<EmailAvailability>> {
    let available = state
        .services
        .student_service
        .is_email_unique(&query.email, query.exclude_id)
        .await?;
    Ok(Json(EmailAvailability {
        email: query.email,
        available,
    }))
}
