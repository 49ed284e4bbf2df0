//! Database service layer
//!
//! Bundles the four repositories behind their traits so the services can be
//! built the same way over Postgres or over the in-memory store.

use std::sync::Arc;
use crate::database::{
    DatabasePool, EventRepository, FeedbackRepository, InMemoryStore, PgEventRepository, PgFeedbackRepository,
    PgRegistrationRepository, PgStudentRepository, RegistrationRepository, StudentRepository,
};
use crate::utils::errors::CampusEventsError;

#[derive(Clone)]
pub struct DatabaseService {
    pub events: Arc<dyn EventRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub feedback: Arc<dyn FeedbackRepository>,
    pool: Option<DatabasePool>,
}

impl DatabaseService {
    /// Repositories backed by Postgres
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: Arc::new(PgEventRepository::new(pool.clone())),
            students: Arc::new(PgStudentRepository::new(pool.clone())),
            registrations: Arc::new(PgRegistrationRepository::new(pool.clone())),
            feedback: Arc::new(PgFeedbackRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Repositories sharing one in-memory store
    pub fn in_memory() -> Self {
        Self::from_store(InMemoryStore::new())
    }

    pub fn from_store(store: InMemoryStore) -> Self {
        Self {
            events: Arc::new(store.clone()),
            students: Arc::new(store.clone()),
            registrations: Arc::new(store.clone()),
            feedback: Arc::new(store),
            pool: None,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.pool.is_none()
    }

    /// Check store health
    pub async fn health_check(&self) -> Result<(), CampusEventsError> {
        match &self.pool {
            Some(pool) => super::health_check(pool).await,
            None => Ok(()),
        }
    }
}
