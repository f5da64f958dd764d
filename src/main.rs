//! Cumulus Server — personal cloud drive
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use cumulus_core::config::AppConfig;
use cumulus_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("CUMULUS_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Cumulus v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Collection stores ────────────────────────────────
    let mut db_pool = None;
    let stores = match config.database.provider.as_str() {
        "postgres" => {
            tracing::info!("Connecting to database...");
            let pool = cumulus_database::DatabasePool::connect(&config.database).await?;
            pool.run_migrations().await?;

            let stores = cumulus_database::Stores::postgres(pool.pool().clone());
            db_pool = Some(pool);
            stores
        }
        "memory" => {
            tracing::warn!("Using in-memory stores; data will not survive a restart");
            cumulus_database::Stores::memory()
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            )));
        }
    };

    // ── Step 2: Blob gateway ─────────────────────────────────────
    tracing::info!("Initializing blob storage...");
    let blobs = cumulus_storage::BlobGateway::new(&config.storage).await?;

    // ── Step 3: Identity gate ────────────────────────────────────
    let identity_gate = cumulus_auth::IdentityGate::new(&config.auth)?;

    // ── Step 4: Services ─────────────────────────────────────────
    let recorder = cumulus_service::ActivityRecorder::new(stores.activities.clone());

    let folder_service = Arc::new(cumulus_service::FolderService::new(
        stores.folders.clone(),
        recorder.clone(),
    ));
    let file_service = Arc::new(cumulus_service::FileService::new(
        stores.files.clone(),
        stores.folders.clone(),
        blobs.clone(),
        recorder.clone(),
    ));
    let search_service = Arc::new(cumulus_service::SearchService::new(
        stores.files.clone(),
        stores.folders.clone(),
    ));
    let share_service = Arc::new(cumulus_service::ShareService::new(
        stores.shares.clone(),
        stores.files.clone(),
        stores.folders.clone(),
        recorder,
        config.sharing.public_base_url.clone(),
    ));
    let activity_service = Arc::new(cumulus_service::ActivityService::new(
        stores.activities.clone(),
        config.worker.prune_batch_size,
    ));

    tracing::info!("Services initialized");

    // ── Step 5: Background worker ────────────────────────────────
    let scheduler = if config.worker.enabled {
        let scheduler = cumulus_worker::CronScheduler::new().await?;
        let retention = Arc::new(cumulus_worker::jobs::RetentionJob::new(
            Arc::clone(&activity_service),
            &config.worker,
        ));
        scheduler.register_retention(retention).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // ── Step 6: HTTP server ──────────────────────────────────────
    let app_state = cumulus_api::AppState {
        config: Arc::new(config.clone()),
        identity_gate,
        blobs,
        folder_service,
        file_service,
        search_service,
        share_service,
        activity_service,
    };

    let app = cumulus_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Cumulus server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 7: Drain background tasks ───────────────────────────
    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await?;
    }
    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("Cumulus server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
