//! Property tests for capacity, email uniqueness and feedback aggregation

mod helpers;

use campus_events::models::Feedback;
use campus_events::services::summarize_feedback;
use campus_events::CampusEventsError;
use chrono::Utc;
use helpers::*;
use proptest::prelude::*;

fn feedback_entry(id: i64, ratings: (i32, i32, i32, i32), would_recommend: bool) -> Feedback {
    Feedback {
        id,
        event_id: 1,
        student_id: id,
        rating: ratings.0,
        organization_rating: ratings.1,
        content_rating: ratings.2,
        venue_rating: ratings.3,
        comment: None,
        suggestions: None,
        would_recommend,
        submitted_at: Utc::now(),
    }
}

fn rating() -> impl Strategy<Value = i32> {
    1..=5i32
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn summary_distribution_sums_to_entry_count(
        entries in prop::collection::vec(((rating(), rating(), rating(), rating()), any::<bool>()), 0..40)
    ) {
        let feedback: Vec<Feedback> = entries
            .iter()
            .enumerate()
            .map(|(i, (ratings, recommend))| feedback_entry(i as i64 + 1, *ratings, *recommend))
            .collect();

        let summary = summarize_feedback(1, &feedback);

        prop_assert_eq!(summary.total_feedback, feedback.len() as i64);
        prop_assert_eq!(summary.rating_distribution.values().sum::<i64>(), feedback.len() as i64);
        prop_assert!(summary.recommendation_percentage >= 0.0 && summary.recommendation_percentage <= 100.0);
        if feedback.is_empty() {
            prop_assert!(summary.rating_distribution.is_empty());
            prop_assert_eq!(summary.average_rating, 0.0);
        } else {
            prop_assert!(summary.average_rating >= 1.0 && summary.average_rating <= 5.0);
            prop_assert!(summary.overall_score >= 1.0 && summary.overall_score <= 5.0);
        }
    }

    #[test]
    fn participants_never_exceed_capacity(capacity in 1..6i32, attempts in 0..12usize) {
        let (count, available) = tokio_test::block_on(async {
            let ctx = TestContext::in_memory();
            let event = ctx.create_event("Property Event", capacity).await;

            for _ in 0..attempts {
                let student = ctx.create_student().await;
                let result = ctx
                    .services
                    .registration_service
                    .register(registration_request(event.id, student.id))
                    .await;
                if let Err(e) = result {
                    assert!(matches!(e, CampusEventsError::CapacityExceeded { .. }));
                }
            }

            let events = &ctx.services.event_service;
            (
                events.participant_count(event.id).await.unwrap(),
                events.available_capacity(event.id).await.unwrap(),
            )
        });

        prop_assert_eq!(count, (attempts as i64).min(i64::from(capacity)));
        prop_assert!(available >= 0);
        prop_assert_eq!(available, i64::from(capacity) - count);
    }

    #[test]
    fn emails_collide_regardless_of_case(local in "[a-z]{1,12}", mask in prop::collection::vec(any::<bool>(), 12)) {
        let original = format!("{}@campus.edu", local);
        let shuffled: String = original
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();

        let duplicate_rejected = tokio_test::block_on(async {
            let ctx = TestContext::in_memory();
            let students = &ctx.services.student_service;
            students.create_student(student_request_with_email(&original)).await.unwrap();
            matches!(
                students.create_student(student_request_with_email(&shuffled)).await,
                Err(CampusEventsError::DuplicateEmail { .. })
            )
        });

        prop_assert!(duplicate_rejected);
    }
}
