//! Registration model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "registration_status")]
pub enum RegistrationStatus {
    Pending,
    #[default]
    Confirmed,
    Cancelled,
    Waitlisted,
    Completed,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "Pending",
            RegistrationStatus::Confirmed => "Confirmed",
            RegistrationStatus::Cancelled => "Cancelled",
            RegistrationStatus::Waitlisted => "Waitlisted",
            RegistrationStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub student_id: i64,
    pub registered_at: DateTime<Utc>,
    pub status: RegistrationStatus,
    pub special_requirements: Option<String>,
    pub checked_in: bool,
    pub check_in_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRegistrationRequest {
    pub event_id: i64,
    pub student_id: i64,
    #[validate(length(max = 500, message = "Special requirements cannot exceed 500 characters"))]
    pub special_requirements: Option<String>,
    #[validate(length(max = 200, message = "Notes cannot exceed 200 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRegistrationStatusRequest {
    pub status: RegistrationStatus,
}
