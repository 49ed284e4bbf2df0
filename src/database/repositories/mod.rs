//! Database repositories module
//!
//! The repository traits are the storage contract the services are written
//! against. `Pg*Repository` implement them over Postgres; the in-memory store
//! in [`crate::database::memory`] implements all four for tests and demos.
//!
//! Guarded inserts (`RegistrationRepository::create_guarded`,
//! `FeedbackRepository::create_guarded`, `StudentRepository::create`) re-check
//! their uniqueness and capacity rules atomically with the write, so the
//! invariants hold even when two requests for the same pair race.

pub mod event;
pub mod student;
pub mod registration;
pub mod feedback;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::models::{
    CreateEventRequest, CreateFeedbackRequest, CreateRegistrationRequest, CreateStudentRequest, Event,
    EventCategory, Feedback, Registration, RegistrationStatus, Student, UpdateEventRequest, UpdateStudentRequest,
};
use crate::utils::errors::{CampusEventsError, Result};

// Re-export repositories
pub use event::PgEventRepository;
pub use student::PgStudentRepository;
pub use registration::PgRegistrationRepository;
pub use feedback::PgFeedbackRepository;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, request: CreateEventRequest) -> Result<Event>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>>;
    /// Overwrite the mutable fields; `None` when the event does not exist
    async fn update(&self, id: i64, request: UpdateEventRequest) -> Result<Option<Event>>;
    /// Delete the event with its registrations and feedback
    async fn delete(&self, id: i64) -> Result<bool>;
    /// All events ordered by date ascending
    async fn list(&self) -> Result<Vec<Event>>;
    /// Case-insensitive substring match over title, description and venue
    async fn search(&self, term: &str) -> Result<Vec<Event>>;
    async fn find_by_category(&self, category: EventCategory) -> Result<Vec<Event>>;
    /// Events dated within `[start, end]`
    async fn find_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Event>>;
    async fn find_upcoming(&self, after: DateTime<Utc>, limit: i64) -> Result<Vec<Event>>;
    async fn participant_count(&self, event_id: i64) -> Result<i64>;
    async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert a student, failing with `DuplicateEmail` on a case-insensitive clash
    async fn create(&self, request: CreateStudentRequest) -> Result<Student>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>>;
    /// Overwrite the mutable fields; `None` when the student does not exist
    async fn update(&self, id: i64, request: UpdateStudentRequest) -> Result<Option<Student>>;
    /// Delete the student with their registrations and feedback
    async fn delete(&self, id: i64) -> Result<bool>;
    /// All students ordered by full name
    async fn list(&self) -> Result<Vec<Student>>;
    /// Case-insensitive substring match over name, email, student number and department
    async fn search(&self, term: &str) -> Result<Vec<Student>>;
    /// Case-insensitive exact department match
    async fn find_by_department(&self, department: &str) -> Result<Vec<Student>>;
    async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> Result<bool>;
    async fn registration_count(&self, student_id: i64) -> Result<i64>;
    async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert a confirmed registration if the event still has room and the pair is new
    async fn create_guarded(&self, request: CreateRegistrationRequest) -> Result<Registration>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Registration>>;
    async fn find_by_pair(&self, event_id: i64, student_id: i64) -> Result<Option<Registration>>;
    async fn delete(&self, id: i64) -> Result<bool>;
    /// Newest first
    async fn list(&self) -> Result<Vec<Registration>>;
    /// Oldest first
    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Registration>>;
    /// Newest first
    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Registration>>;
    async fn update_status(&self, id: i64, status: RegistrationStatus) -> Result<Option<Registration>>;
    async fn check_in(&self, id: i64, at: DateTime<Utc>) -> Result<Option<Registration>>;
    async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Insert feedback if the pair holds a registration and has not rated yet
    async fn create_guarded(&self, request: CreateFeedbackRequest) -> Result<Feedback>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Feedback>>;
    async fn find_by_pair(&self, event_id: i64, student_id: i64) -> Result<Option<Feedback>>;
    /// Newest first
    async fn list(&self) -> Result<Vec<Feedback>>;
    /// Newest first
    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Feedback>>;
    /// Newest first
    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Feedback>>;
    async fn count(&self) -> Result<i64>;
}

/// Map a unique-constraint violation to a domain conflict, pass anything else through
pub(crate) fn conflict_on_unique(error: sqlx::Error, conflict: CampusEventsError) -> CampusEventsError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => conflict,
        _ => CampusEventsError::Database(error),
    }
}
