//! HTTP handlers module
//!
//! This module contains the axum routes organized by resource:
//! - Event, student, registration and feedback endpoints under `/api`
//! - Health and statistics endpoints

pub mod error;
pub mod extract;
pub mod events;
pub mod students;
pub mod registrations;
pub mod feedback;
pub mod system;

use std::sync::Arc;
use axum::{middleware, routing::get, Router};
use serde::Deserialize;
use crate::middleware::log_requests;
use crate::services::ServiceFactory;

// Re-export commonly used handler types
pub use error::{ApiError, ApiResult};
pub use extract::{ApiJson, ApiPath, ApiQuery};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceFactory>,
}

impl AppState {
    pub fn new(services: ServiceFactory) -> Self {
        Self {
            services: Arc::new(services),
        }
    }
}

/// `?q=` query used by the search endpoints
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/stats", get(system::stats))
        .nest("/events", events::routes())
        .nest("/students", students::routes())
        .nest("/registrations", registrations::routes())
        .nest("/feedback", feedback::routes());

    Router::new()
        .route("/health", get(system::health))
        .nest("/api", api)
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}
