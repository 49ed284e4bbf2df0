//! Database connection management

use sqlx::{Pool, Postgres};
use std::time::{Duration, Instant};
use crate::config::DatabaseConfig;
use crate::utils::errors::CampusEventsError;
use crate::utils::logging::log_database_operation;

pub type DatabasePool = Pool<Postgres>;

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, CampusEventsError> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(Some(Duration::from_secs(600)))
        .max_lifetime(Some(Duration::from_secs(1800)))
        .connect(&config.url)
        .await?;

    // Test the connection
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), CampusEventsError> {
    tracing::info!("Running database migrations...");

    let start_time = Instant::now();
    let result = sqlx::migrate!("./migrations").run(pool).await;
    log_database_operation("migrate", "_sqlx_migrations", elapsed_ms(start_time), result.is_ok());
    result?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &DatabasePool) -> Result<(), CampusEventsError> {
    let start_time = Instant::now();
    let result = sqlx::query("SELECT 1").execute(pool).await;
    log_database_operation("health_check", "-", elapsed_ms(start_time), result.is_ok());
    result?;

    Ok(())
}

fn elapsed_ms(start_time: Instant) -> u64 {
    u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX)
}
