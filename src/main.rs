//! Campus Events backend
//!
//! Main application entry point

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use campus_events::{
    build_router,
    config::Settings,
    database::{create_pool, run_migrations, DatabaseService},
    services::ServiceFactory,
    utils::logging,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", campus_events::info());

    let database_service = if settings.features.use_in_memory_store {
        warn!("Using the in-memory store, data will not survive a restart");
        DatabaseService::in_memory()
    } else {
        info!("Connecting to database...");
        let db_pool = create_pool(&settings.database).await?;

        if settings.database.run_migrations {
            info!("Running database migrations...");
            run_migrations(&db_pool).await?;
        }
        DatabaseService::new(db_pool)
    };

    info!("Initializing services...");
    let services = ServiceFactory::new(database_service);
    let app = build_router(AppState::new(services));

    let address = settings.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!(address = %address, "Listening for HTTP requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Campus Events backend has been shut down.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
