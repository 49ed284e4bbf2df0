//! Feedback repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use crate::database::timestamps;
use crate::models::feedback::{Feedback, CreateFeedbackRequest};
use crate::utils::errors::{CampusEventsError, Result};
use super::{conflict_on_unique, FeedbackRepository};

#[derive(Clone, Debug)]
pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    /// Insert feedback only when the pair holds a registration
    async fn create_guarded(&self, request: CreateFeedbackRequest) -> Result<Feedback> {
        let event_id = request.event_id;
        let student_id = request.student_id;
        let feedback = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (event_id, student_id, rating, organization_rating, content_rating, venue_rating, comment, suggestions, would_recommend, submitted_at)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10
            WHERE EXISTS (SELECT 1 FROM registrations WHERE event_id = $1 AND student_id = $2)
            RETURNING id, event_id, student_id, rating, organization_rating, content_rating, venue_rating, comment, suggestions, would_recommend, submitted_at
            "#
        )
        .bind(event_id)
        .bind(student_id)
        .bind(request.rating)
        .bind(request.organization_rating)
        .bind(request.content_rating)
        .bind(request.venue_rating)
        .bind(request.comment)
        .bind(request.suggestions)
        .bind(request.would_recommend)
        .bind(timestamps::creation_stamp())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, CampusEventsError::DuplicateFeedback { event_id, student_id }))?;

        feedback.ok_or(CampusEventsError::NotRegistered { event_id, student_id })
    }

    /// Find feedback by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Feedback>> {
        let feedback = sqlx::query_as::<_, Feedback>(
            "SELECT id, event_id, student_id, rating, organization_rating, content_rating, venue_rating, comment, suggestions, would_recommend, submitted_at FROM feedback WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(feedback)
    }

    /// Find the feedback a student left for an event
    async fn find_by_pair(&self, event_id: i64, student_id: i64) -> Result<Option<Feedback>> {
        let feedback = sqlx::query_as::<_, Feedback>(
            "SELECT id, event_id, student_id, rating, organization_rating, content_rating, venue_rating, comment, suggestions, would_recommend, submitted_at FROM feedback WHERE event_id = $1 AND student_id = $2"
        )
        .bind(event_id)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(feedback)
    }

    /// List all feedback, newest first
    async fn list(&self) -> Result<Vec<Feedback>> {
        let feedback = sqlx::query_as::<_, Feedback>(
            "SELECT id, event_id, student_id, rating, organization_rating, content_rating, venue_rating, comment, suggestions, would_recommend, submitted_at FROM feedback ORDER BY submitted_at DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(feedback)
    }

    /// Get feedback for an event, newest first
    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Feedback>> {
        let feedback = sqlx::query_as::<_, Feedback>(
            "SELECT id, event_id, student_id, rating, organization_rating, content_rating, venue_rating, comment, suggestions, would_recommend, submitted_at FROM feedback WHERE event_id = $1 ORDER BY submitted_at DESC, id DESC"
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(feedback)
    }

    /// Get feedback by a student, newest first
    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Feedback>> {
        let feedback = sqlx::query_as::<_, Feedback>(
            "SELECT id, event_id, student_id, rating, organization_rating, content_rating, venue_rating, comment, suggestions, would_recommend, submitted_at FROM feedback WHERE student_id = $1 ORDER BY submitted_at DESC, id DESC"
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(feedback)
    }

    /// Count total feedback
    async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feedback")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
