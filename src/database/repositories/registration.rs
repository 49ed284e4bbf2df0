//! Registration repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use crate::database::timestamps;
use crate::models::registration::{Registration, RegistrationStatus, CreateRegistrationRequest};
use crate::utils::errors::{CampusEventsError, Result};
use super::{conflict_on_unique, RegistrationRepository};

#[derive(Clone, Debug)]
pub struct PgRegistrationRepository {
    pool: PgPool,
}

impl PgRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for PgRegistrationRepository {
    /// Register a student while holding the event row lock
    ///
    /// Locking the event serializes concurrent registrations for the same
    /// event, so the recount below cannot be outdated by the time the insert
    /// commits. The `(event_id, student_id)` unique constraint rejects the
    /// second of two racing inserts for the same pair.
    async fn create_guarded(&self, request: CreateRegistrationRequest) -> Result<Registration> {
        let event_id = request.event_id;
        let student_id = request.student_id;
        let mut tx = self.pool.begin().await?;

        let capacity: Option<(i32,)> = sqlx::query_as(
            "SELECT max_capacity FROM events WHERE id = $1 FOR UPDATE"
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((max_capacity,)) = capacity else {
            return Err(CampusEventsError::EventNotFound { event_id });
        };

        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1"
        )
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;

        if count.0 >= i64::from(max_capacity) {
            return Err(CampusEventsError::CapacityExceeded { event_id, max_capacity });
        }

        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (event_id, student_id, registered_at, status, special_requirements, checked_in, notes)
            VALUES ($1, $2, $3, $4, $5, FALSE, $6)
            RETURNING id, event_id, student_id, registered_at, status, special_requirements, checked_in, check_in_time, notes
            "#
        )
        .bind(event_id)
        .bind(student_id)
        .bind(timestamps::creation_stamp())
        .bind(RegistrationStatus::default())
        .bind(request.special_requirements)
        .bind(request.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_error) if db_error.is_foreign_key_violation() => {
                CampusEventsError::StudentNotFound { student_id }
            }
            _ => conflict_on_unique(e, CampusEventsError::DuplicateRegistration { event_id, student_id }),
        })?;

        tx.commit().await?;
        Ok(registration)
    }

    /// Find registration by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Registration>> {
        let registration = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, student_id, registered_at, status, special_requirements, checked_in, check_in_time, notes FROM registrations WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Find the registration of a student for an event
    async fn find_by_pair(&self, event_id: i64, student_id: i64) -> Result<Option<Registration>> {
        let registration = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, student_id, registered_at, status, special_requirements, checked_in, check_in_time, notes FROM registrations WHERE event_id = $1 AND student_id = $2"
        )
        .bind(event_id)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Delete registration
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all registrations, newest first
    async fn list(&self) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, student_id, registered_at, status, special_requirements, checked_in, check_in_time, notes FROM registrations ORDER BY registered_at DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Get event registrations, oldest first
    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, student_id, registered_at, status, special_requirements, checked_in, check_in_time, notes FROM registrations WHERE event_id = $1 ORDER BY registered_at ASC, id ASC"
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Get student registrations, newest first
    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, student_id, registered_at, status, special_requirements, checked_in, check_in_time, notes FROM registrations WHERE student_id = $1 ORDER BY registered_at DESC, id DESC"
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Update registration status
    async fn update_status(&self, id: i64, status: RegistrationStatus) -> Result<Option<Registration>> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            UPDATE registrations
            SET status = $2
            WHERE id = $1
            RETURNING id, event_id, student_id, registered_at, status, special_requirements, checked_in, check_in_time, notes
            "#
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Mark a registration as checked in
    async fn check_in(&self, id: i64, at: DateTime<Utc>) -> Result<Option<Registration>> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            UPDATE registrations
            SET checked_in = TRUE, check_in_time = $2
            WHERE id = $1
            RETURNING id, event_id, student_id, registered_at, status, special_requirements, checked_in, check_in_time, notes
            "#
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Count total registrations
    async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM registrations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
