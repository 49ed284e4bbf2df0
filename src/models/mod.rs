//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod student;
pub mod registration;
pub mod feedback;

// Re-export commonly used models
pub use event::{Event, EventCategory, EventDetails, CreateEventRequest, UpdateEventRequest};
pub use student::{Student, StudentStatus, StudentProfile, CreateStudentRequest, UpdateStudentRequest};
pub use registration::{Registration, RegistrationStatus, CreateRegistrationRequest, UpdateRegistrationStatusRequest};
pub use feedback::{Feedback, FeedbackSummary, CreateFeedbackRequest};
