//! Registration service implementation
//!
//! The enrollment manager. `register` checks its rules in a fixed order so
//! callers always see the first violated rule, then hands the insert to the
//! store's guarded create which re-checks capacity and uniqueness atomically.

use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, info};
use validator::Validate;
use crate::database::RegistrationRepository;
use crate::models::registration::{Registration, RegistrationStatus, CreateRegistrationRequest};
use crate::services::{EventService, StudentService};
use crate::utils::errors::{CampusEventsError, Result};
use crate::utils::logging::{log_registration_action, log_rule_violation};

#[derive(Clone)]
pub struct RegistrationService {
    registrations: Arc<dyn RegistrationRepository>,
    event_service: EventService,
    student_service: StudentService,
}

impl RegistrationService {
    pub fn new(
        registrations: Arc<dyn RegistrationRepository>,
        event_service: EventService,
        student_service: StudentService,
    ) -> Self {
        Self {
            registrations,
            event_service,
            student_service,
        }
    }

    /// Register a student for an event
    ///
    /// Fails with, in order: `EventNotFound`, `CapacityExceeded`,
    /// `StudentNotFound`, `DuplicateRegistration`.
    pub async fn register(&self, request: CreateRegistrationRequest) -> Result<Registration> {
        request.validate()?;

        let event_id = request.event_id;
        let student_id = request.student_id;
        debug!(event_id = event_id, student_id = student_id, "Registering student for event");

        let result = self.check_and_register(request).await;
        match &result {
            Ok(registration) => {
                log_registration_action(event_id, student_id, "registered", Some(registration.status.as_str()))
            }
            Err(e) if !e.is_recoverable() => {}
            Err(e) => log_rule_violation("register", e),
        }
        result
    }

    async fn check_and_register(&self, request: CreateRegistrationRequest) -> Result<Registration> {
        let event_id = request.event_id;
        let student_id = request.student_id;

        let Some(event) = self.event_service.get_event(event_id).await? else {
            return Err(CampusEventsError::EventNotFound { event_id });
        };
        if !self.event_service.has_available_capacity(event_id).await? {
            return Err(CampusEventsError::CapacityExceeded {
                event_id,
                max_capacity: event.max_capacity,
            });
        }
        if self.student_service.get_student(student_id).await?.is_none() {
            return Err(CampusEventsError::StudentNotFound { student_id });
        }
        if self.registrations.find_by_pair(event_id, student_id).await?.is_some() {
            return Err(CampusEventsError::DuplicateRegistration { event_id, student_id });
        }

        self.registrations.create_guarded(request).await
    }

    pub async fn get_registration(&self, id: i64) -> Result<Option<Registration>> {
        self.registrations.find_by_id(id).await
    }

    /// Remove a registration regardless of its status; `false` if absent
    pub async fn cancel_registration(&self, id: i64) -> Result<bool> {
        let Some(registration) = self.registrations.find_by_id(id).await? else {
            return Ok(false);
        };

        let deleted = self.registrations.delete(id).await?;
        if deleted {
            log_registration_action(registration.event_id, registration.student_id, "cancelled", None);
        }
        Ok(deleted)
    }

    pub async fn list_registrations(&self) -> Result<Vec<Registration>> {
        self.registrations.list().await
    }

    /// Oldest first, in sign-up order
    pub async fn registrations_for_event(&self, event_id: i64) -> Result<Vec<Registration>> {
        self.registrations.list_by_event(event_id).await
    }

    pub async fn registrations_for_student(&self, student_id: i64) -> Result<Vec<Registration>> {
        self.registrations.list_by_student(student_id).await
    }

    // Any status may move to any other status.
    pub async fn update_status(&self, id: i64, status: RegistrationStatus) -> Result<Option<Registration>> {
        let updated = self.registrations.update_status(id, status).await?;
        if let Some(registration) = &updated {
            info!(
                registration_id = id,
                event_id = registration.event_id,
                status = status.as_str(),
                "Registration status updated"
            );
        }
        Ok(updated)
    }

    pub async fn is_registered(&self, event_id: i64, student_id: i64) -> Result<bool> {
        Ok(self.registrations.find_by_pair(event_id, student_id).await?.is_some())
    }

    /// Mark attendance at the current time; `None` if the registration is absent
    pub async fn check_in(&self, id: i64) -> Result<Option<Registration>> {
        let checked_in = self.registrations.check_in(id, Utc::now()).await?;
        if let Some(registration) = &checked_in {
            log_registration_action(registration.event_id, registration.student_id, "checked_in", None);
        }
        Ok(checked_in)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use crate::services::test_support::*;
    use crate::services::ServiceFactory;
    use super::*;

    fn request(event_id: i64, student_id: i64) -> CreateRegistrationRequest {
        CreateRegistrationRequest {
            event_id,
            student_id,
            special_requirements: None,
            notes: None,
        }
    }

    async fn student(services: &ServiceFactory, email: &str) -> i64 {
        services
            .student_service
            .create_student(student_request("Test Student", email))
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_register_defaults() {
        let services = services();
        let event = services.event_service.create_event(event_request("Career Fair", 10)).await.unwrap();
        let student_id = student(&services, "a@u.edu").await;

        let registration = services.registration_service.register(request(event.id, student_id)).await.unwrap();
        assert_eq!(registration.status, RegistrationStatus::Confirmed);
        assert!(!registration.checked_in);
        assert!(registration.check_in_time.is_none());
        assert!(services.registration_service.is_registered(event.id, student_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_capacity_one_scenario() {
        let services = services();
        let event = services.event_service.create_event(event_request("Tiny Seminar", 1)).await.unwrap();
        let first = student(&services, "first@u.edu").await;
        let second = student(&services, "second@u.edu").await;

        services.registration_service.register(request(event.id, first)).await.unwrap();
        let result = services.registration_service.register(request(event.id, second)).await;

        assert_matches!(result, Err(CampusEventsError::CapacityExceeded { max_capacity: 1, .. }));
        assert_eq!(services.event_service.participant_count(event.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_error_order_event_then_capacity_then_student() {
        let services = services();
        let registrations = &services.registration_service;

        assert_matches!(
            registrations.register(request(77, 88)).await,
            Err(CampusEventsError::EventNotFound { event_id: 77 })
        );

        let full = services.event_service.create_event(event_request("Full Event", 1)).await.unwrap();
        let taker = student(&services, "taker@u.edu").await;
        registrations.register(request(full.id, taker)).await.unwrap();
        // A missing student on a full event still reports capacity first.
        assert_matches!(
            registrations.register(request(full.id, 999)).await,
            Err(CampusEventsError::CapacityExceeded { .. })
        );

        let open = services.event_service.create_event(event_request("Open Event", 5)).await.unwrap();
        assert_matches!(
            registrations.register(request(open.id, 999)).await,
            Err(CampusEventsError::StudentNotFound { student_id: 999 })
        );

        registrations.register(request(open.id, taker)).await.unwrap();
        assert_matches!(
            registrations.register(request(open.id, taker)).await,
            Err(CampusEventsError::DuplicateRegistration { .. })
        );
    }

    #[tokio::test]
    async fn test_cancel_frees_a_spot() {
        let services = services();
        let event = services.event_service.create_event(event_request("Pottery Class", 1)).await.unwrap();
        let first = student(&services, "first@u.edu").await;
        let second = student(&services, "second@u.edu").await;

        let registration = services.registration_service.register(request(event.id, first)).await.unwrap();
        assert!(services.registration_service.cancel_registration(registration.id).await.unwrap());
        assert!(!services.registration_service.cancel_registration(registration.id).await.unwrap());

        services.registration_service.register(request(event.id, second)).await.unwrap();
        assert_eq!(services.event_service.available_capacity(event.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_status_update_and_check_in() {
        let services = services();
        let event = services.event_service.create_event(event_request("Film Night", 3)).await.unwrap();
        let student_id = student(&services, "film@u.edu").await;
        let registration = services.registration_service.register(request(event.id, student_id)).await.unwrap();

        let waitlisted = services
            .registration_service
            .update_status(registration.id, RegistrationStatus::Waitlisted)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(waitlisted.status, RegistrationStatus::Waitlisted);

        let back = services
            .registration_service
            .update_status(registration.id, RegistrationStatus::Confirmed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(back.status, RegistrationStatus::Confirmed);

        let checked_in = services.registration_service.check_in(registration.id).await.unwrap().unwrap();
        assert!(checked_in.checked_in);
        assert!(checked_in.check_in_time.is_some());

        assert!(services.registration_service.check_in(999).await.unwrap().is_none());
        assert!(services
            .registration_service
            .update_status(999, RegistrationStatus::Cancelled)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_listing_orders() {
        let services = services();
        let event = services.event_service.create_event(event_request("Book Club", 10)).await.unwrap();
        let other = services.event_service.create_event(event_request("Chess Club", 10)).await.unwrap();
        let first = student(&services, "first@u.edu").await;
        let second = student(&services, "second@u.edu").await;

        let r1 = services.registration_service.register(request(event.id, first)).await.unwrap();
        let r2 = services.registration_service.register(request(event.id, second)).await.unwrap();
        let r3 = services.registration_service.register(request(other.id, first)).await.unwrap();

        let for_event: Vec<i64> = services
            .registration_service
            .registrations_for_event(event.id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(for_event, vec![r1.id, r2.id]);

        let for_student: Vec<i64> = services
            .registration_service
            .registrations_for_student(first)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(for_student, vec![r3.id, r1.id]);

        let all = services.registration_service.list_registrations().await.unwrap();
        assert_eq!(all.first().map(|r| r.id), Some(r3.id));
    }
}
