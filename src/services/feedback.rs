//! Feedback service implementation
//!
//! Feedback is only accepted from students registered for the event, at most
//! once per (event, student) pair. Summaries are computed from the stored
//! entries on every request.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;
use crate::database::{FeedbackRepository, RegistrationRepository};
use crate::models::feedback::{Feedback, FeedbackSummary, CreateFeedbackRequest};
use crate::utils::errors::{CampusEventsError, Result};
use crate::utils::helpers::{mean, round_two_decimals};
use crate::utils::logging::{log_feedback_action, log_rule_violation};

#[derive(Clone)]
pub struct FeedbackService {
    feedback: Arc<dyn FeedbackRepository>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl FeedbackService {
    pub fn new(feedback: Arc<dyn FeedbackRepository>, registrations: Arc<dyn RegistrationRepository>) -> Self {
        Self { feedback, registrations }
    }

    /// Submit feedback for an event
    ///
    /// Fails with `DuplicateFeedback` before `NotRegistered`.
    pub async fn submit_feedback(&self, request: CreateFeedbackRequest) -> Result<Feedback> {
        request.validate()?;

        let event_id = request.event_id;
        let student_id = request.student_id;

        if self.feedback.find_by_pair(event_id, student_id).await?.is_some() {
            let error = CampusEventsError::DuplicateFeedback { event_id, student_id };
            log_rule_violation("submit_feedback", &error);
            return Err(error);
        }
        if self.registrations.find_by_pair(event_id, student_id).await?.is_none() {
            let error = CampusEventsError::NotRegistered { event_id, student_id };
            log_rule_violation("submit_feedback", &error);
            return Err(error);
        }

        let feedback = self.feedback.create_guarded(request).await?;
        log_feedback_action(event_id, student_id, feedback.rating);
        Ok(feedback)
    }

    pub async fn get_feedback(&self, id: i64) -> Result<Option<Feedback>> {
        self.feedback.find_by_id(id).await
    }

    pub async fn list_feedback(&self) -> Result<Vec<Feedback>> {
        self.feedback.list().await
    }

    pub async fn feedback_for_event(&self, event_id: i64) -> Result<Vec<Feedback>> {
        self.feedback.list_by_event(event_id).await
    }

    pub async fn feedback_for_student(&self, student_id: i64) -> Result<Vec<Feedback>> {
        self.feedback.list_by_student(student_id).await
    }

    /// Mean primary rating, `0.0` when the event has no feedback
    pub async fn average_rating(&self, event_id: i64) -> Result<f64> {
        let entries = self.feedback.list_by_event(event_id).await?;
        Ok(mean(entries.iter().map(|f| f64::from(f.rating))))
    }

    pub async fn has_submitted(&self, event_id: i64, student_id: i64) -> Result<bool> {
        Ok(self.feedback.find_by_pair(event_id, student_id).await?.is_some())
    }

    pub async fn event_summary(&self, event_id: i64) -> Result<FeedbackSummary> {
        let entries = self.feedback.list_by_event(event_id).await?;
        debug!(event_id = event_id, entries = entries.len(), "Summarizing feedback");
        Ok(summarize_feedback(event_id, &entries))
    }
}

/// Aggregate a set of feedback entries for one event
pub fn summarize_feedback(event_id: i64, entries: &[Feedback]) -> FeedbackSummary {
    if entries.is_empty() {
        return FeedbackSummary::empty(event_id);
    }

    let average_of = |rating: fn(&Feedback) -> i32| {
        round_two_decimals(mean(entries.iter().map(|f| f64::from(rating(f)))))
    };

    let recommending = entries.iter().filter(|f| f.would_recommend).count();
    let recommendation_percentage = round_two_decimals(recommending as f64 / entries.len() as f64 * 100.0);

    let mut rating_distribution = BTreeMap::new();
    for entry in entries {
        *rating_distribution.entry(entry.rating).or_insert(0) += 1;
    }

    FeedbackSummary {
        event_id,
        total_feedback: entries.len() as i64,
        average_rating: average_of(|f| f.rating),
        average_organization_rating: average_of(|f| f.organization_rating),
        average_content_rating: average_of(|f| f.content_rating),
        average_venue_rating: average_of(|f| f.venue_rating),
        recommendation_percentage,
        rating_distribution,
        overall_score: round_two_decimals(mean(entries.iter().map(Feedback::average_score))),
    }
}
