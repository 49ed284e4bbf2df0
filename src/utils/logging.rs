//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Campus Events application.

use tracing::{info, warn, debug, error};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::LoggingConfig;
use crate::utils::errors::{CampusEventsError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer when dropped and must be held
/// for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| CampusEventsError::Config(format!("Invalid log filter {}: {}", config.level, e)))?;

    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let json_stdout = config.json.then(|| fmt::layer().json().with_writer(std::io::stdout));
    let plain_stdout = (!config.json).then(|| fmt::layer().with_writer(std::io::stdout));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_stdout)
        .with(plain_stdout)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| CampusEventsError::Config(format!("Failed to install subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log event management actions
pub fn log_event_action(event_id: i64, action: &str, details: Option<&str>) {
    info!(
        event_id = event_id,
        action = action,
        details = details,
        "Event action performed"
    );
}

/// Log student profile actions
pub fn log_student_action(student_id: i64, action: &str, details: Option<&str>) {
    info!(
        student_id = student_id,
        action = action,
        details = details,
        "Student action performed"
    );
}

/// Log registration actions
pub fn log_registration_action(event_id: i64, student_id: i64, action: &str, details: Option<&str>) {
    info!(
        event_id = event_id,
        student_id = student_id,
        action = action,
        details = details,
        "Registration action performed"
    );
}

/// Log feedback actions
pub fn log_feedback_action(event_id: i64, student_id: i64, rating: i32) {
    info!(
        event_id = event_id,
        student_id = student_id,
        rating = rating,
        "Feedback submitted"
    );
}

/// Log a rejected request together with the rule it broke
pub fn log_rule_violation(operation: &str, error: &CampusEventsError) {
    warn!(
        operation = operation,
        error = %error,
        severity = %error.severity(),
        "Business rule rejected request"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
