//! Test data helpers for creating request objects
//!
//! Student fixtures use `fake` for names and departments; emails carry a
//! process-wide counter so fixtures never collide on the unique email index.

use std::sync::atomic::{AtomicUsize, Ordering};
use campus_events::models::{
    CreateEventRequest, CreateFeedbackRequest, CreateRegistrationRequest, CreateStudentRequest, EventCategory,
    StudentStatus,
};
use chrono::{DateTime, Duration, Utc};
use fake::faker::company::en::Industry;
use fake::faker::name::en::Name;
use fake::Fake;

static EMAIL_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Event a week from now
pub fn event_request(title: &str, max_capacity: i32) -> CreateEventRequest {
    event_request_on(title, max_capacity, Utc::now() + Duration::days(7))
}

pub fn event_request_on(title: &str, max_capacity: i32, event_date: DateTime<Utc>) -> CreateEventRequest {
    CreateEventRequest {
        title: title.to_string(),
        description: Some(format!("{} open to every student", title)),
        venue: "Great Hall".to_string(),
        event_date,
        max_capacity,
        registration_deadline: None,
        category: EventCategory::Workshop,
    }
}

/// Student with a generated name and a unique email
pub fn student_request() -> CreateStudentRequest {
    let n = EMAIL_COUNTER.fetch_add(1, Ordering::SeqCst);
    student_request_with_email(&format!("student{}@u.edu", n))
}

pub fn student_request_with_email(email: &str) -> CreateStudentRequest {
    let n = EMAIL_COUNTER.fetch_add(1, Ordering::SeqCst);
    let full_name: String = Name().fake();
    let department: String = Industry().fake();

    CreateStudentRequest {
        full_name,
        email: email.to_string(),
        phone: None,
        student_number: format!("S{:06}", n),
        department: department.chars().take(100).collect(),
        year_of_study: (1..=8).fake(),
        enrollment_date: None,
        status: StudentStatus::Active,
    }
}

pub fn registration_request(event_id: i64, student_id: i64) -> CreateRegistrationRequest {
    CreateRegistrationRequest {
        event_id,
        student_id,
        special_requirements: None,
        notes: None,
    }
}

pub fn feedback_request(event_id: i64, student_id: i64, rating: i32) -> CreateFeedbackRequest {
    CreateFeedbackRequest::with_rating(event_id, student_id, rating)
}
