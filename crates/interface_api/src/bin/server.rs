//! Booking Ledger - API Server Binary
//!
//! This binary starts the HTTP API server for the booking ledger.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin ledger-api
//!
//! # Run without a database
//! LEDGER_STORAGE=memory cargo run --bin ledger-api
//! ```
//!
//! # Environment Variables
//!
//! * `LEDGER_HOST` - Server host (default: 0.0.0.0)
//! * `LEDGER_PORT` - Server port (default: 8080)
//! * `LEDGER_STORAGE` - `postgres` or `memory` (default: postgres)
//! * `LEDGER_DATABASE_URL` - PostgreSQL connection string (`DATABASE_URL` is also honored)
//! * `LEDGER_DB_MAX_CONNECTIONS` / `LEDGER_DB_MIN_CONNECTIONS` - Pool sizing
//! * `LEDGER_DB_ACQUIRE_TIMEOUT_SECS` - Pool acquire timeout
//! * `LEDGER_GST_RATE`, `LEDGER_INSURANCE_RATE`, `LEDGER_DELIVERY_CHARGE` - Settlement rates
//! * `LEDGER_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use domain_booking::{InMemoryLedgerStore, LedgerStore};
use infra_db::{create_pool, run_migrations, PostgresLedgerStore};
use interface_api::{create_router, config::{ApiConfig, StorageBackend}};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, opens the ledger store,
/// and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - Database connection or migrations fail
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();

    init_tracing(&config.log_level);
    config.validate()?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage,
        "Starting Booking Ledger API Server"
    );

    let store = open_store(&config).await?;

    let addr: SocketAddr = config.server_addr().parse()?;
    let app = create_router(store, config);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to defaults if the environment cannot be deserialized.
fn load_config() -> ApiConfig {
    let mut config = ApiConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Invalid LEDGER_* configuration ({}), using defaults", e);
        ApiConfig::default()
    });

    if std::env::var("LEDGER_DATABASE_URL").is_err() {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = url;
        }
    }

    config
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Opens the configured ledger store, migrating PostgreSQL first.
async fn open_store(config: &ApiConfig) -> Result<Arc<dyn LedgerStore>, Box<dyn std::error::Error>> {
    match config.storage {
        StorageBackend::Postgres => {
            let pool = create_pool(config.database_config()).await?;
            run_migrations(&pool).await?;
            let store: Arc<dyn LedgerStore> = Arc::new(PostgresLedgerStore::new(pool));
            Ok(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; bookings are lost on restart");
            let store: Arc<dyn LedgerStore> = Arc::new(InMemoryLedgerStore::new());
            Ok(store)
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
