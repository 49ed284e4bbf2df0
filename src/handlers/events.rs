//! Event endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::handlers::{ApiError, ApiJson, ApiPath, ApiQuery, ApiResult, AppState, SearchQuery};
use crate::utils::errors::CampusEventsError;
use crate::models::event::{Event, EventCategory, EventDetails, CreateEventRequest, UpdateEventRequest};

const DEFAULT_UPCOMING_LIMIT: i64 = 10;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/search", get(search_events))
        .route("/upcoming", get(upcoming_events))
        .route("/range", get(events_in_range))
        .route("/category/:category", get(events_by_category))
        .route("/:id", get(get_event).put(update_event).delete(delete_event))
        .route("/:id/availability", get(availability))
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct Availability {
    pub event_id: i64,
    pub has_available_capacity: bool,
    pub available_capacity: i64,
    pub participant_count: i64,
}

async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(state.services.event_service.list_events().await?))
}

async fn create_event(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let event = state.services.event_service.create_event(request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

async fn get_event(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<EventDetails>> {
    state
        .services
        .event_service
        .get_event_details(id)
        .await?
        .map(Json)
        .ok_or_else(|| CampusEventsError::EventNotFound { event_id: id }.into())
}

async fn update_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateEventRequest>,
) -> ApiResult<Json<Event>> {
    state
        .services
        .event_service
        .update_event(id, request)
        .await?
        .map(Json)
        .ok_or_else(|| CampusEventsError::EventNotFound { event_id: id }.into())
}

async fn delete_event(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<StatusCode> {
    if state.services.event_service.delete_event(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CampusEventsError::EventNotFound { event_id: id }.into())
    }
}

async fn search_events(State(state): State<AppState>, ApiQuery(query): ApiQuery<SearchQuery>) -> ApiResult<Json<Vec<Event>>> {
    let term = query.q.unwrap_or_default();
    Ok(Json(state.services.event_service.search_events(&term).await?))
}

async fn events_by_category(
    State(state): State<AppState>,
    ApiPath(category): ApiPath<EventCategory>,
) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(state.services.event_service.events_by_category(category).await?))
}

async fn events_in_range(State(state): State<AppState>, ApiQuery(range): ApiQuery<RangeQuery>) -> ApiResult<Json<Vec<Event>>> {
    if range.start > range.end {
        return Err(ApiError::bad_request("Range start must not be after its end"));
    }
    Ok(Json(state.services.event_service.events_in_range(range.start, range.end).await?))
}

async fn upcoming_events(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UpcomingQuery>,
) -> ApiResult<Json<Vec<Event>>> {
    let limit = query.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT);
    Ok(Json(state.services.event_service.upcoming_events(limit).await?))
}

async fn availability(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Availability>> {
    let events = &state.services.event_service;
    if events.get_event(id).await?.is_none() {
        return Err(CampusEventsError::EventNotFound { event_id: id }.into());
    }

    Ok(Json(Availability {
        event_id: id,
        has_available_capacity: events.has_available_capacity(id).await?,
        available_capacity: events.available_capacity(id).await?,
        participant_count: events.participant_count(id).await?,
    }))
}
