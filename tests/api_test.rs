//! HTTP API tests driving the router in-process

mod helpers;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use campus_events::models::EventCategory;
use chrono::{Duration, TimeZone, Utc};
use helpers::*;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_event_queries() {
    let ctx = TestContext::in_memory();
    let base = Utc.with_ymd_and_hms(2031, 3, 10, 9, 0, 0).unwrap();

    let mut workshop = event_request_on("Rust Workshop", 20, base);
    workshop.category = EventCategory::Workshop;
    ctx.services.event_service.create_event(workshop).await.unwrap();

    let mut concert = event_request_on("Spring Concert", 200, base + Duration::days(5));
    concert.category = EventCategory::Cultural;
    ctx.services.event_service.create_event(concert).await.unwrap();

    let app = ctx.app();

    let (status, events) = call(&app, "GET", "/api/events", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events.as_array().unwrap().len(), 2);

    let (_, found) = call(&app, "GET", "/api/events/search?q=rust", None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (_, cultural) = call(&app, "GET", "/api/events/category/Cultural", None).await;
    assert_eq!(cultural[0]["title"], "Spring Concert");

    let (_, ranged) = call(
        &app,
        "GET",
        "/api/events/range?start=2031-03-10T09:00:00Z&end=2031-03-11T00:00:00Z",
        None,
    )
    .await;
    assert_eq!(ranged.as_array().unwrap().len(), 1);

    let (status, body) = call(
        &app,
        "GET",
        "/api/events/range?start=2031-03-12T00:00:00Z&end=2031-03-11T00:00:00Z",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (_, upcoming) = call(&app, "GET", "/api/events/upcoming?limit=1", None).await;
    assert_eq!(upcoming[0]["title"], "Rust Workshop");
}

#[tokio::test]
async fn test_event_update_and_delete() {
    let ctx = TestContext::in_memory();
    let event = ctx.create_event("Career Talk", 30).await;
    let app = ctx.app();

    let (status, updated) = call(
        &app,
        "PUT",
        &format!("/api/events/{}", event.id),
        Some(json!({
            "title": "Career Talk: Industry",
            "description": null,
            "venue": "Room 101",
            "event_date": "2031-09-01T10:00:00Z",
            "max_capacity": 40,
            "registration_deadline": null,
            "category": "Seminar"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["max_capacity"], 40);

    let (status, body) = call(
        &app,
        "POST",
        "/api/events",
        Some(json!({
            "title": "X",
            "description": null,
            "venue": "Room 101",
            "event_date": "2031-09-01T10:00:00Z",
            "max_capacity": 0,
            "registration_deadline": null,
            "category": "Seminar"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = call(&app, "DELETE", &format!("/api/events/{}", event.id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, "DELETE", &format!("/api/events/{}", event.id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_registration_endpoints() {
    let ctx = TestContext::in_memory();
    let event = ctx.create_event("Debate Club", 5).await;
    let student = ctx.create_student().await;
    let app = ctx.app();

    let (status, body) = call(
        &app,
        "POST",
        "/api/registrations",
        Some(json!({ "event_id": event.id, "student_id": 4242 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "STUDENT_NOT_FOUND");

    let (status, registration) = call(
        &app,
        "POST",
        "/api/registrations",
        Some(json!({ "event_id": event.id, "student_id": student.id, "notes": "vegetarian" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = registration["id"].as_i64().unwrap();

    let (status, body) = call(
        &app,
        "POST",
        "/api/registrations",
        Some(json!({ "event_id": event.id, "student_id": student.id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DUPLICATE_REGISTRATION");

    let (_, updated) = call(
        &app,
        "PUT",
        &format!("/api/registrations/{}/status", id),
        Some(json!({ "status": "Completed" })),
    )
    .await;
    assert_eq!(updated["status"], "Completed");

    let (status, checked_in) = call(&app, "POST", &format!("/api/registrations/{}/check-in", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(checked_in["checked_in"], true);

    let (_, for_event) = call(&app, "GET", &format!("/api/registrations/event/{}", event.id), None).await;
    assert_eq!(for_event.as_array().unwrap().len(), 1);

    let (_, profile) = call(&app, "GET", &format!("/api/students/{}", student.id), None).await;
    assert_eq!(profile["total_events_attended"], 1);

    let (status, _) = call(&app, "DELETE", &format!("/api/registrations/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_feedback_endpoints() {
    let ctx = TestContext::in_memory();
    let event = ctx.create_event("Chess Simul", 5).await;
    let student = ctx.registered_student(event.id).await;
    let outsider = ctx.create_student().await;
    let app = ctx.app();

    let (status, body) = call(
        &app,
        "POST",
        "/api/feedback",
        Some(json!({ "event_id": event.id, "student_id": outsider.id, "rating": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NOT_REGISTERED");

    let (status, _) = call(
        &app,
        "POST",
        "/api/feedback",
        Some(json!({
            "event_id": event.id,
            "student_id": student.id,
            "rating": 5,
            "organization_rating": 3,
            "content_rating": 4,
            "venue_rating": 5,
            "would_recommend": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/feedback/check?event_id={}&student_id={}", event.id, student.id);
    let (_, check) = call(&app, "GET", &uri, None).await;
    assert_eq!(check["has_submitted"], true);

    let (_, average) = call(&app, "GET", &format!("/api/feedback/event/{}/average", event.id), None).await;
    assert_eq!(average["average_rating"], 5.0);

    let (_, summary) = call(&app, "GET", &format!("/api/feedback/event/{}/summary", event.id), None).await;
    assert_eq!(summary["overall_score"], 4.25);
    assert_eq!(summary["recommendation_percentage"], 0.0);

    let (status, _) = call(&app, "GET", "/api/feedback/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_requests_are_validation_errors() {
    let ctx = TestContext::in_memory();
    let event = ctx.create_event("Poetry Reading", 10).await;
    let app = ctx.app();

    let (status, body) = call(
        &app,
        "POST",
        "/api/feedback",
        Some(json!({ "event_id": event.id, "student_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("rating"));

    let (status, body) = call(
        &app,
        "POST",
        "/api/registrations",
        Some(json!({ "event_id": "first", "student_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = call(&app, "GET", "/api/events/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = call(&app, "GET", "/api/events/category/Karaoke", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = call(&app, "GET", "/api/events/range?start=yesterday&end=today", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_resources_report_their_kind() {
    let ctx = TestContext::in_memory();
    let app = ctx.app();

    let (status, body) = call(&app, "GET", "/api/events/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EVENT_NOT_FOUND");

    let (status, body) = call(&app, "DELETE", "/api/students/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "STUDENT_NOT_FOUND");

    let (status, body) = call(&app, "POST", "/api/registrations/404/check-in", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "REGISTRATION_NOT_FOUND");

    let (status, body) = call(&app, "GET", "/api/feedback/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "FEEDBACK_NOT_FOUND");
}
