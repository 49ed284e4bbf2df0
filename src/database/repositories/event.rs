//! Event repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use crate::database::timestamps;
use crate::models::event::{Event, EventCategory, CreateEventRequest, UpdateEventRequest};
use crate::utils::errors::Result;
use crate::utils::helpers::like_pattern;
use super::EventRepository;

#[derive(Clone, Debug)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    /// Create a new event
    async fn create(&self, request: CreateEventRequest) -> Result<Event> {
        let now = timestamps::creation_stamp();
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, venue, event_date, max_capacity, registration_deadline, category, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, venue, event_date, max_capacity, registration_deadline, category, created_at, updated_at
            "#
        )
        .bind(request.title)
        .bind(request.description)
        .bind(request.venue)
        .bind(request.event_date)
        .bind(request.max_capacity)
        .bind(request.registration_deadline)
        .bind(request.category)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, venue, event_date, max_capacity, registration_deadline, category, created_at, updated_at FROM events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update event
    async fn update(&self, id: i64, request: UpdateEventRequest) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = $2,
                description = $3,
                venue = $4,
                event_date = $5,
                max_capacity = $6,
                registration_deadline = $7,
                category = $8,
                updated_at = GREATEST($9, updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            RETURNING id, title, description, venue, event_date, max_capacity, registration_deadline, category, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.venue)
        .bind(request.event_date)
        .bind(request.max_capacity)
        .bind(request.registration_deadline)
        .bind(request.category)
        .bind(timestamps::creation_stamp())
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete event, cascading to registrations and feedback
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all events by date
    async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, venue, event_date, max_capacity, registration_deadline, category, created_at, updated_at FROM events ORDER BY event_date ASC, id ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Search events by title, description or venue
    async fn search(&self, term: &str) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, venue, event_date, max_capacity, registration_deadline, category, created_at, updated_at
            FROM events
            WHERE title ILIKE $1 OR description ILIKE $1 OR venue ILIKE $1
            ORDER BY event_date ASC, id ASC
            "#
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Get events in a category
    async fn find_by_category(&self, category: EventCategory) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, venue, event_date, max_capacity, registration_deadline, category, created_at, updated_at FROM events WHERE category = $1 ORDER BY event_date ASC, id ASC"
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Get events between two dates, bounds included
    async fn find_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, venue, event_date, max_capacity, registration_deadline, category, created_at, updated_at FROM events WHERE event_date >= $1 AND event_date <= $2 ORDER BY event_date ASC, id ASC"
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Get upcoming events
    async fn find_upcoming(&self, after: DateTime<Utc>, limit: i64) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, venue, event_date, max_capacity, registration_deadline, category, created_at, updated_at FROM events WHERE event_date > $1 ORDER BY event_date ASC, id ASC LIMIT $2"
        )
        .bind(after)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Get participant count for event
    async fn participant_count(&self, event_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1"
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Count total events
    async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
