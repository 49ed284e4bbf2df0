//! Student model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "student_status")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    Graduated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub student_number: String,
    pub department: String,
    pub year_of_study: i32,
    pub enrollment_date: DateTime<Utc>,
    pub status: StudentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Student together with the number of events they registered for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentProfile {
    #[serde(flatten)]
    pub student: Student,
    pub total_events_attended: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 2, max = 100, message = "Full name must be between 2 and 100 characters"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"), length(max = 255))]
    pub email: String,
    #[validate(length(max = 15, message = "Phone cannot exceed 15 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 20, message = "Student number cannot exceed 20 characters"))]
    pub student_number: String,
    #[validate(length(max = 100, message = "Department cannot exceed 100 characters"))]
    pub department: String,
    #[validate(range(min = 1, max = 8, message = "Year of study must be between 1 and 8"))]
    pub year_of_study: i32,
    pub enrollment_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: StudentStatus,
}

/// Updates overwrite every mutable field, so they share the creation shape
pub type UpdateStudentRequest = CreateStudentRequest;
