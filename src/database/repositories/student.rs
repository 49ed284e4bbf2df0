//! Student repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use crate::database::timestamps;
use crate::models::student::{Student, CreateStudentRequest, UpdateStudentRequest};
use crate::utils::errors::{CampusEventsError, Result};
use crate::utils::helpers::like_pattern;
use super::{conflict_on_unique, StudentRepository};

#[derive(Clone, Debug)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    /// Create a new student
    async fn create(&self, request: CreateStudentRequest) -> Result<Student> {
        let now = timestamps::creation_stamp();
        let email = request.email.clone();
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (full_name, email, phone, student_number, department, year_of_study, enrollment_date, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, full_name, email, phone, student_number, department, year_of_study, enrollment_date, status, created_at, updated_at
            "#
        )
        .bind(request.full_name)
        .bind(request.email)
        .bind(request.phone)
        .bind(request.student_number)
        .bind(request.department)
        .bind(request.year_of_study)
        .bind(request.enrollment_date.unwrap_or(now))
        .bind(request.status)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, CampusEventsError::DuplicateEmail { email }))?;

        Ok(student)
    }

    /// Find student by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, full_name, email, phone, student_number, department, year_of_study, enrollment_date, status, created_at, updated_at FROM students WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    /// Find student by email, ignoring case
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, full_name, email, phone, student_number, department, year_of_study, enrollment_date, status, created_at, updated_at FROM students WHERE LOWER(email) = LOWER($1)"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    /// Update student
    async fn update(&self, id: i64, request: UpdateStudentRequest) -> Result<Option<Student>> {
        let email = request.email.clone();
        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET full_name = $2,
                email = $3,
                phone = $4,
                student_number = $5,
                department = $6,
                year_of_study = $7,
                enrollment_date = COALESCE($8, enrollment_date),
                status = $9,
                updated_at = GREATEST($10, updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            RETURNING id, full_name, email, phone, student_number, department, year_of_study, enrollment_date, status, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.full_name)
        .bind(request.email)
        .bind(request.phone)
        .bind(request.student_number)
        .bind(request.department)
        .bind(request.year_of_study)
        .bind(request.enrollment_date)
        .bind(request.status)
        .bind(timestamps::creation_stamp())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, CampusEventsError::DuplicateEmail { email }))?;

        Ok(student)
    }

    /// Delete student, cascading to registrations and feedback
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all students by name
    async fn list(&self) -> Result<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, full_name, email, phone, student_number, department, year_of_study, enrollment_date, status, created_at, updated_at FROM students ORDER BY full_name ASC, id ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    /// Search students by name, email, student number or department
    async fn search(&self, term: &str) -> Result<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, full_name, email, phone, student_number, department, year_of_study, enrollment_date, status, created_at, updated_at
            FROM students
            WHERE full_name ILIKE $1 OR email ILIKE $1 OR student_number ILIKE $1 OR department ILIKE $1
            ORDER BY full_name ASC, id ASC
            "#
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    /// Get students of a department
    async fn find_by_department(&self, department: &str) -> Result<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, full_name, email, phone, student_number, department, year_of_study, enrollment_date, status, created_at, updated_at FROM students WHERE LOWER(department) = LOWER($1) ORDER BY full_name ASC, id ASC"
        )
        .bind(department)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    /// Check whether another student already uses the email
    async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM students WHERE LOWER(email) = LOWER($1) AND ($2::BIGINT IS NULL OR id <> $2))"
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    /// Count registrations held by a student
    async fn registration_count(&self, student_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE student_id = $1"
        )
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Count total students
    async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
