//! Student service implementation

use std::sync::Arc;
use tracing::debug;
use validator::Validate;
use crate::database::StudentRepository;
use crate::models::student::{Student, StudentProfile, CreateStudentRequest, UpdateStudentRequest};
use crate::utils::errors::{CampusEventsError, Result};
use crate::utils::helpers::search_term;
use crate::utils::logging::{log_rule_violation, log_student_action};

#[derive(Clone)]
pub struct StudentService {
    students: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(students: Arc<dyn StudentRepository>) -> Self {
        Self { students }
    }

    /// Create a student; emails are unique case-insensitively
    pub async fn create_student(&self, request: CreateStudentRequest) -> Result<Student> {
        request.validate()?;

        if self.students.email_exists(&request.email, None).await? {
            let error = CampusEventsError::DuplicateEmail { email: request.email };
            log_rule_violation("create_student", &error);
            return Err(error);
        }

        let student = self.students.create(request).await?;
        log_student_action(student.id, "created", Some(&student.email));
        Ok(student)
    }

    pub async fn get_student(&self, id: i64) -> Result<Option<Student>> {
        debug!(student_id = id, "Getting student by ID");
        self.students.find_by_id(id).await
    }

    pub async fn get_student_profile(&self, id: i64) -> Result<Option<StudentProfile>> {
        let Some(student) = self.students.find_by_id(id).await? else {
            return Ok(None);
        };
        let total_events_attended = self.students.registration_count(id).await?;
        Ok(Some(StudentProfile { student, total_events_attended }))
    }

    pub async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        debug!(email = %email, "Getting student by email");
        self.students.find_by_email(email.trim()).await
    }

    /// Overwrite a student's fields; the new email may not belong to anyone else
    pub async fn update_student(&self, id: i64, request: UpdateStudentRequest) -> Result<Option<Student>> {
        request.validate()?;

        if self.students.find_by_id(id).await?.is_none() {
            debug!(student_id = id, "Update skipped, student not found");
            return Ok(None);
        }
        if self.students.email_exists(&request.email, Some(id)).await? {
            let error = CampusEventsError::DuplicateEmail { email: request.email };
            log_rule_violation("update_student", &error);
            return Err(error);
        }

        let updated = self.students.update(id, request).await?;
        if updated.is_some() {
            log_student_action(id, "updated", None);
        }
        Ok(updated)
    }

    /// Delete a student with their registrations and feedback; `false` if absent
    pub async fn delete_student(&self, id: i64) -> Result<bool> {
        let deleted = self.students.delete(id).await?;
        if deleted {
            log_student_action(id, "deleted", None);
        }
        Ok(deleted)
    }

    pub async fn list_students(&self) -> Result<Vec<Student>> {
        self.students.list().await
    }

    /// Case-insensitive search over name, email, student number and department
    pub async fn search_students(&self, query: &str) -> Result<Vec<Student>> {
        match search_term(query) {
            Some(term) => {
                debug!(term = %term, "Searching students");
                self.students.search(term).await
            }
            None => self.students.list().await,
        }
    }

    pub async fn students_by_department(&self, department: &str) -> Result<Vec<Student>> {
        self.students.find_by_department(department.trim()).await
    }

    pub async fn is_email_unique(&self, email: &str, exclude_id: Option<i64>) -> Result<bool> {
        Ok(!self.students.email_exists(email.trim(), exclude_id).await?)
    }
}
