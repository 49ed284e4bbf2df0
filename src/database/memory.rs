//! In-memory entity store
//!
//! Implements every repository trait over `BTreeMap` tables behind a single
//! `RwLock`. Guarded inserts check their rules and write under the same
//! write lock, which gives them the same atomicity the Postgres constraints
//! give the SQL repositories. Used for tests and for running the server
//! without a database.

use std::collections::BTreeMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use crate::database::repositories::{EventRepository, FeedbackRepository, RegistrationRepository, StudentRepository};
use crate::database::timestamps;
use crate::models::{
    CreateEventRequest, CreateFeedbackRequest, CreateRegistrationRequest, CreateStudentRequest, Event,
    EventCategory, Feedback, Registration, RegistrationStatus, Student, UpdateEventRequest, UpdateStudentRequest,
};
use crate::utils::errors::{CampusEventsError, Result};
use crate::utils::helpers::{contains_ignore_case, eq_ignore_case};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Debug, Default)]
struct Tables {
    events: Table<Event>,
    students: Table<Student>,
    registrations: Table<Registration>,
    feedback: Table<Feedback>,
}

impl Tables {
    fn participant_count(&self, event_id: i64) -> i64 {
        self.registrations.rows.values().filter(|r| r.event_id == event_id).count() as i64
    }

    fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> bool {
        self.students
            .rows
            .values()
            .any(|s| Some(s.id) != exclude_id && eq_ignore_case(&s.email, email))
    }

    fn registration_for(&self, event_id: i64, student_id: i64) -> Option<&Registration> {
        self.registrations
            .rows
            .values()
            .find(|r| r.event_id == event_id && r.student_id == student_id)
    }

    fn feedback_for(&self, event_id: i64, student_id: i64) -> Option<&Feedback> {
        self.feedback
            .rows
            .values()
            .find(|f| f.event_id == event_id && f.student_id == student_id)
    }
}

fn sorted_events(mut events: Vec<Event>) -> Vec<Event> {
    events.sort_by(|a, b| a.event_date.cmp(&b.event_date).then(a.id.cmp(&b.id)));
    events
}

fn sorted_students(mut students: Vec<Student>) -> Vec<Student> {
    students.sort_by(|a, b| a.full_name.cmp(&b.full_name).then(a.id.cmp(&b.id)));
    students
}

fn newest_registrations_first(mut registrations: Vec<Registration>) -> Vec<Registration> {
    registrations.sort_by(|a, b| b.registered_at.cmp(&a.registered_at).then(b.id.cmp(&a.id)));
    registrations
}

fn newest_feedback_first(mut feedback: Vec<Feedback>) -> Vec<Feedback> {
    feedback.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at).then(b.id.cmp(&a.id)));
    feedback
}

/// Shared in-memory store; clones share the same tables
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn create(&self, request: CreateEventRequest) -> Result<Event> {
        let mut tables = self.tables.write().await;
        let now = timestamps::creation_stamp();
        let event = Event {
            id: tables.events.next_id(),
            title: request.title,
            description: request.description,
            venue: request.venue,
            event_date: request.event_date,
            max_capacity: request.max_capacity,
            registration_deadline: request.registration_deadline,
            category: request.category,
            created_at: now,
            updated_at: now,
        };
        tables.events.rows.insert(event.id, event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>> {
        Ok(self.tables.read().await.events.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, request: UpdateEventRequest) -> Result<Option<Event>> {
        let mut tables = self.tables.write().await;
        let Some(event) = tables.events.rows.get_mut(&id) else {
            return Ok(None);
        };

        event.title = request.title;
        event.description = request.description;
        event.venue = request.venue;
        event.event_date = request.event_date;
        event.max_capacity = request.max_capacity;
        event.registration_deadline = request.registration_deadline;
        event.category = request.category;
        event.updated_at = timestamps::modification_stamp(event.updated_at);
        Ok(Some(event.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.events.rows.remove(&id).is_none() {
            return Ok(false);
        }
        tables.registrations.rows.retain(|_, r| r.event_id != id);
        tables.feedback.rows.retain(|_, f| f.event_id != id);
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<Event>> {
        let tables = self.tables.read().await;
        Ok(sorted_events(tables.events.rows.values().cloned().collect()))
    }

    async fn search(&self, term: &str) -> Result<Vec<Event>> {
        let tables = self.tables.read().await;
        let matches = tables
            .events
            .rows
            .values()
            .filter(|e| {
                contains_ignore_case(&e.title, term)
                    || e.description.as_deref().is_some_and(|d| contains_ignore_case(d, term))
                    || contains_ignore_case(&e.venue, term)
            })
            .cloned()
            .collect();
        Ok(sorted_events(matches))
    }

    async fn find_by_category(&self, category: EventCategory) -> Result<Vec<Event>> {
        let tables = self.tables.read().await;
        let matches = tables.events.rows.values().filter(|e| e.category == category).cloned().collect();
        Ok(sorted_events(matches))
    }

    async fn find_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Event>> {
        let tables = self.tables.read().await;
        let matches = tables
            .events
            .rows
            .values()
            .filter(|e| e.event_date >= start && e.event_date <= end)
            .cloned()
            .collect();
        Ok(sorted_events(matches))
    }

    async fn find_upcoming(&self, after: DateTime<Utc>, limit: i64) -> Result<Vec<Event>> {
        let tables = self.tables.read().await;
        let upcoming = tables.events.rows.values().filter(|e| e.event_date > after).cloned().collect();
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(sorted_events(upcoming).into_iter().take(limit).collect())
    }

    async fn participant_count(&self, event_id: i64) -> Result<i64> {
        Ok(self.tables.read().await.participant_count(event_id))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.tables.read().await.events.rows.len() as i64)
    }
}

#[async_trait]
impl StudentRepository for InMemoryStore {
    async fn create(&self, request: CreateStudentRequest) -> Result<Student> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&request.email, None) {
            return Err(CampusEventsError::DuplicateEmail { email: request.email });
        }

        let now = timestamps::creation_stamp();
        let student = Student {
            id: tables.students.next_id(),
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
            student_number: request.student_number,
            department: request.department,
            year_of_study: request.year_of_study,
            enrollment_date: request.enrollment_date.unwrap_or(now),
            status: request.status,
            created_at: now,
            updated_at: now,
        };
        tables.students.rows.insert(student.id, student.clone());
        Ok(student)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>> {
        Ok(self.tables.read().await.students.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>> {
        let tables = self.tables.read().await;
        Ok(tables.students.rows.values().find(|s| eq_ignore_case(&s.email, email)).cloned())
    }

    async fn update(&self, id: i64, request: UpdateStudentRequest) -> Result<Option<Student>> {
        let mut tables = self.tables.write().await;
        if !tables.students.rows.contains_key(&id) {
            return Ok(None);
        }
        if tables.email_taken(&request.email, Some(id)) {
            return Err(CampusEventsError::DuplicateEmail { email: request.email });
        }

        let Some(student) = tables.students.rows.get_mut(&id) else {
            return Ok(None);
        };
        student.full_name = request.full_name;
        student.email = request.email;
        student.phone = request.phone;
        student.student_number = request.student_number;
        student.department = request.department;
        student.year_of_study = request.year_of_study;
        if let Some(enrollment_date) = request.enrollment_date {
            student.enrollment_date = enrollment_date;
        }
        student.status = request.status;
        student.updated_at = timestamps::modification_stamp(student.updated_at);
        Ok(Some(student.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.students.rows.remove(&id).is_none() {
            return Ok(false);
        }
        tables.registrations.rows.retain(|_, r| r.student_id != id);
        tables.feedback.rows.retain(|_, f| f.student_id != id);
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<Student>> {
        let tables = self.tables.read().await;
        Ok(sorted_students(tables.students.rows.values().cloned().collect()))
    }

    async fn search(&self, term: &str) -> Result<Vec<Student>> {
        let tables = self.tables.read().await;
        let matches = tables
            .students
            .rows
            .values()
            .filter(|s| {
                contains_ignore_case(&s.full_name, term)
                    || contains_ignore_case(&s.email, term)
                    || contains_ignore_case(&s.student_number, term)
                    || contains_ignore_case(&s.department, term)
            })
            .cloned()
            .collect();
        Ok(sorted_students(matches))
    }

    async fn find_by_department(&self, department: &str) -> Result<Vec<Student>> {
        let tables = self.tables.read().await;
        let matches = tables
            .students
            .rows
            .values()
            .filter(|s| eq_ignore_case(&s.department, department))
            .cloned()
            .collect();
        Ok(sorted_students(matches))
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> Result<bool> {
        Ok(self.tables.read().await.email_taken(email, exclude_id))
    }

    async fn registration_count(&self, student_id: i64) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables.registrations.rows.values().filter(|r| r.student_id == student_id).count() as i64)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.tables.read().await.students.rows.len() as i64)
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryStore {
    async fn create_guarded(&self, request: CreateRegistrationRequest) -> Result<Registration> {
        let event_id = request.event_id;
        let student_id = request.student_id;
        let mut tables = self.tables.write().await;

        let max_capacity = tables
            .events
            .rows
            .get(&event_id)
            .map(|e| e.max_capacity)
            .ok_or(CampusEventsError::EventNotFound { event_id })?;
        if tables.participant_count(event_id) >= i64::from(max_capacity) {
            return Err(CampusEventsError::CapacityExceeded { event_id, max_capacity });
        }
        if !tables.students.rows.contains_key(&student_id) {
            return Err(CampusEventsError::StudentNotFound { student_id });
        }
        if tables.registration_for(event_id, student_id).is_some() {
            return Err(CampusEventsError::DuplicateRegistration { event_id, student_id });
        }

        let registration = Registration {
            id: tables.registrations.next_id(),
            event_id,
            student_id,
            registered_at: timestamps::creation_stamp(),
            status: RegistrationStatus::default(),
            special_requirements: request.special_requirements,
            checked_in: false,
            check_in_time: None,
            notes: request.notes,
        };
        tables.registrations.rows.insert(registration.id, registration.clone());
        Ok(registration)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Registration>> {
        Ok(self.tables.read().await.registrations.rows.get(&id).cloned())
    }

    async fn find_by_pair(&self, event_id: i64, student_id: i64) -> Result<Option<Registration>> {
        Ok(self.tables.read().await.registration_for(event_id, student_id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.tables.write().await.registrations.rows.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Registration>> {
        let tables = self.tables.read().await;
        Ok(newest_registrations_first(tables.registrations.rows.values().cloned().collect()))
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Registration>> {
        let tables = self.tables.read().await;
        let mut registrations: Vec<Registration> = tables
            .registrations
            .rows
            .values()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        registrations.sort_by(|a, b| a.registered_at.cmp(&b.registered_at).then(a.id.cmp(&b.id)));
        Ok(registrations)
    }

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Registration>> {
        let tables = self.tables.read().await;
        let registrations = tables
            .registrations
            .rows
            .values()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect();
        Ok(newest_registrations_first(registrations))
    }

    async fn update_status(&self, id: i64, status: RegistrationStatus) -> Result<Option<Registration>> {
        let mut tables = self.tables.write().await;
        Ok(tables.registrations.rows.get_mut(&id).map(|registration| {
            registration.status = status;
            registration.clone()
        }))
    }

    async fn check_in(&self, id: i64, at: DateTime<Utc>) -> Result<Option<Registration>> {
        let mut tables = self.tables.write().await;
        Ok(tables.registrations.rows.get_mut(&id).map(|registration| {
            registration.checked_in = true;
            registration.check_in_time = Some(at);
            registration.clone()
        }))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.tables.read().await.registrations.rows.len() as i64)
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryStore {
    async fn create_guarded(&self, request: CreateFeedbackRequest) -> Result<Feedback> {
        let event_id = request.event_id;
        let student_id = request.student_id;
        let mut tables = self.tables.write().await;

        if tables.feedback_for(event_id, student_id).is_some() {
            return Err(CampusEventsError::DuplicateFeedback { event_id, student_id });
        }
        if tables.registration_for(event_id, student_id).is_none() {
            return Err(CampusEventsError::NotRegistered { event_id, student_id });
        }

        let feedback = Feedback {
            id: tables.feedback.next_id(),
            event_id,
            student_id,
            rating: request.rating,
            organization_rating: request.organization_rating,
            content_rating: request.content_rating,
            venue_rating: request.venue_rating,
            comment: request.comment,
            suggestions: request.suggestions,
            would_recommend: request.would_recommend,
            submitted_at: timestamps::creation_stamp(),
        };
        tables.feedback.rows.insert(feedback.id, feedback.clone());
        Ok(feedback)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Feedback>> {
        Ok(self.tables.read().await.feedback.rows.get(&id).cloned())
    }

    async fn find_by_pair(&self, event_id: i64, student_id: i64) -> Result<Option<Feedback>> {
        Ok(self.tables.read().await.feedback_for(event_id, student_id).cloned())
    }

    async fn list(&self) -> Result<Vec<Feedback>> {
        let tables = self.tables.read().await;
        Ok(newest_feedback_first(tables.feedback.rows.values().cloned().collect()))
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Feedback>> {
        let tables = self.tables.read().await;
        let feedback = tables.feedback.rows.values().filter(|f| f.event_id == event_id).cloned().collect();
        Ok(newest_feedback_first(feedback))
    }

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Feedback>> {
        let tables = self.tables.read().await;
        let feedback = tables.feedback.rows.values().filter(|f| f.student_id == student_id).cloned().collect();
        Ok(newest_feedback_first(feedback))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.tables.read().await.feedback.rows.len() as i64)
    }
}
