//! Test context for unified test setup
//!
//! Builds the service factory over either store and offers shortcuts for the
//! common "event plus registered students" setup.

use axum::Router;
use campus_events::models::{Event, Student};
use campus_events::{build_router, AppState, DatabaseService, ServiceFactory};

use super::database_helper::TestDatabase;
use super::test_data::{event_request, registration_request, student_request};

/// Unified test context that manages all test components
pub struct TestContext {
    pub services: ServiceFactory,
    pub database: Option<TestDatabase>,
}

impl TestContext {
    /// Services over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self {
            services: ServiceFactory::new(DatabaseService::in_memory()),
            database: None,
        }
    }

    /// Services over a migrated, empty Postgres database
    pub async fn postgres() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let database = TestDatabase::new().await?;
        Ok(Self {
            services: ServiceFactory::new(DatabaseService::new(database.pool.clone())),
            database: Some(database),
        })
    }

    /// Router over this context's services
    pub fn app(&self) -> Router {
        build_router(AppState::new(self.services.clone()))
    }

    pub async fn create_event(&self, title: &str, max_capacity: i32) -> Event {
        self.services
            .event_service
            .create_event(event_request(title, max_capacity))
            .await
            .expect("Failed to create event")
    }

    pub async fn create_student(&self) -> Student {
        self.services
            .student_service
            .create_student(student_request())
            .await
            .expect("Failed to create student")
    }

    /// Create a student and register them for the event
    pub async fn registered_student(&self, event_id: i64) -> Student {
        let student = self.create_student().await;
        self.services
            .registration_service
            .register(registration_request(event_id, student.id))
            .await
            .expect("Failed to register student");
        student
    }

    /// Clean up test resources
    pub async fn cleanup(&self) -> Result<(), sqlx::Error> {
        match &self.database {
            Some(database) => database.cleanup().await,
            None => Ok(()),
        }
    }
}
