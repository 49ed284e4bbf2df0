//! Services module
//!
//! This module contains the business logic services: the event and student
//! directories, the enrollment manager and the feedback aggregator.

pub mod event;
pub mod student;
pub mod registration;
pub mod feedback;

// Re-export commonly used services
pub use event::EventService;
pub use student::StudentService;
pub use registration::RegistrationService;
pub use feedback::{FeedbackService, summarize_feedback};

use serde::Serialize;
use tracing::warn;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub student_service: StudentService,
    pub registration_service: RegistrationService,
    pub feedback_service: FeedbackService,
    database: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services wired to the same store
    pub fn new(database: DatabaseService) -> Self {
        let event_service = EventService::new(database.events.clone());
        let student_service = StudentService::new(database.students.clone());
        let registration_service = RegistrationService::new(
            database.registrations.clone(),
            event_service.clone(),
            student_service.clone(),
        );
        let feedback_service = FeedbackService::new(database.feedback.clone(), database.registrations.clone());

        Self {
            event_service,
            student_service,
            registration_service,
            feedback_service,
            database,
        }
    }

    /// Totals per collection
    pub async fn statistics(&self) -> Result<SystemStats> {
        Ok(SystemStats {
            total_events: self.database.events.count().await?,
            total_students: self.database.students.count().await?,
            total_registrations: self.database.registrations.count().await?,
            total_feedback: self.database.feedback.count().await?,
        })
    }

    /// Health check for the backing store
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let store_healthy = match self.database.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Store health check failed");
                false
            }
        };

        ServiceHealthStatus {
            store_healthy,
            in_memory_store: self.database.is_in_memory(),
        }
    }
}

/// Totals per collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemStats {
    pub total_events: i64,
    pub total_students: i64,
    pub total_registrations: i64,
    pub total_feedback: i64,
}

/// Health status for all services
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealthStatus {
    pub store_healthy: bool,
    pub in_memory_store: bool,
}

impl ServiceHealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.store_healthy
    }
}
