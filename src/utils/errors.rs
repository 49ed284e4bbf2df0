//! Error handling for Campus Events
//!
//! This module defines the main error type used throughout the application
//! and groups its variants into the categories callers react to.

use thiserror::Error;

/// Main error type for the Campus Events application
#[derive(Error, Debug)]
pub enum CampusEventsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Student not found: {student_id}")]
    StudentNotFound { student_id: i64 },

    #[error("Registration not found: {registration_id}")]
    RegistrationNotFound { registration_id: i64 },

    #[error("Feedback not found: {feedback_id}")]
    FeedbackNotFound { feedback_id: i64 },

    #[error("A student with email {email} already exists")]
    DuplicateEmail { email: String },

    #[error("Student {student_id} is already registered for event {event_id}")]
    DuplicateRegistration { event_id: i64, student_id: i64 },

    #[error("Student {student_id} has already submitted feedback for event {event_id}")]
    DuplicateFeedback { event_id: i64, student_id: i64 },

    #[error("Event {event_id} has reached its maximum capacity of {max_capacity}")]
    CapacityExceeded { event_id: i64, max_capacity: i32 },

    #[error("Student {student_id} is not registered for event {event_id}")]
    NotRegistered { event_id: i64, student_id: i64 },

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Campus Events operations
pub type Result<T> = std::result::Result<T, CampusEventsError>;

/// Broad error categories, independent of any transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    BusinessRule,
    Infrastructure,
}

impl CampusEventsError {
    /// Category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            CampusEventsError::EventNotFound { .. }
            | CampusEventsError::StudentNotFound { .. }
            | CampusEventsError::RegistrationNotFound { .. }
            | CampusEventsError::FeedbackNotFound { .. } => ErrorKind::NotFound,
            CampusEventsError::Validation(_) | CampusEventsError::InvalidInput(_) => ErrorKind::Validation,
            CampusEventsError::DuplicateEmail { .. }
            | CampusEventsError::DuplicateRegistration { .. }
            | CampusEventsError::DuplicateFeedback { .. }
            | CampusEventsError::CapacityExceeded { .. }
            | CampusEventsError::NotRegistered { .. } => ErrorKind::BusinessRule,
            CampusEventsError::Database(_)
            | CampusEventsError::Migration(_)
            | CampusEventsError::Config(_) => ErrorKind::Infrastructure,
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            CampusEventsError::Database(_) => false,
            CampusEventsError::Migration(_) => false,
            CampusEventsError::Config(_) => false,
            // Caller-side failures: the caller can correct the request and try again
            _ => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self.kind() {
            ErrorKind::NotFound | ErrorKind::Validation => ErrorSeverity::Info,
            ErrorKind::BusinessRule => ErrorSeverity::Warning,
            ErrorKind::Infrastructure => ErrorSeverity::Critical,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
