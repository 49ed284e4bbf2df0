//! Feedback model

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub id: i64,
    pub event_id: i64,
    pub student_id: i64,
    pub rating: i32,
    pub organization_rating: i32,
    pub content_rating: i32,
    pub venue_rating: i32,
    pub comment: Option<String>,
    pub suggestions: Option<String>,
    pub would_recommend: bool,
    pub submitted_at: DateTime<Utc>,
}

impl Feedback {
    /// Mean of the primary rating and the three sub-ratings
    pub fn average_score(&self) -> f64 {
        let total = self.rating + self.organization_rating + self.content_rating + self.venue_rating;
        f64::from(total) / 4.0
    }
}

fn default_sub_rating() -> i32 {
    3
}

fn default_would_recommend() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFeedbackRequest {
    pub event_id: i64,
    pub student_id: i64,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    #[serde(default = "default_sub_rating")]
    #[validate(range(min = 1, max = 5, message = "Organization rating must be between 1 and 5"))]
    pub organization_rating: i32,
    #[serde(default = "default_sub_rating")]
    #[validate(range(min = 1, max = 5, message = "Content rating must be between 1 and 5"))]
    pub content_rating: i32,
    #[serde(default = "default_sub_rating")]
    #[validate(range(min = 1, max = 5, message = "Venue rating must be between 1 and 5"))]
    pub venue_rating: i32,
    #[validate(length(max = 1000, message = "Comment cannot exceed 1000 characters"))]
    pub comment: Option<String>,
    #[validate(length(max = 500, message = "Suggestions cannot exceed 500 characters"))]
    pub suggestions: Option<String>,
    #[serde(default = "default_would_recommend")]
    pub would_recommend: bool,
}

impl CreateFeedbackRequest {
    /// Request with only the primary rating set; sub-ratings take their defaults
    pub fn with_rating(event_id: i64, student_id: i64, rating: i32) -> Self {
        Self {
            event_id,
            student_id,
            rating,
            organization_rating: default_sub_rating(),
            content_rating: default_sub_rating(),
            venue_rating: default_sub_rating(),
            comment: None,
            suggestions: None,
            would_recommend: default_would_recommend(),
        }
    }
}

/// Aggregated ratings for one event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedbackSummary {
    pub event_id: i64,
    pub total_feedback: i64,
    pub average_rating: f64,
    pub average_organization_rating: f64,
    pub average_content_rating: f64,
    pub average_venue_rating: f64,
    pub recommendation_percentage: f64,
    pub rating_distribution: BTreeMap<i32, i64>,
    pub overall_score: f64,
}

impl FeedbackSummary {
    pub fn empty(event_id: i64) -> Self {
        Self {
            event_id,
            ..Default::default()
        }
    }
}
