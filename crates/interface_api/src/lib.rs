//! HTTP API Layer
//!
//! This crate provides the REST API for the booking ledger using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Settlement, ledger and health endpoints
//! - **Middleware**: Tracing, panic recovery, CORS, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Every failure is answered with `{"error": message}`
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(store, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_booking::{LedgerService, LedgerStore, SettlementEngine};

use crate::config::ApiConfig;
use crate::middleware::{audit_middleware, panic_response};
use crate::handlers::{health, ledger};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: LedgerService,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `store` - Ledger store backend
/// * `config` - API configuration; its rates drive the settlement engine
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(store: Arc<dyn LedgerStore>, config: ApiConfig) -> Router {
    let engine = SettlementEngine::new(config.settlement_rates());
    let state = AppState {
        service: LedgerService::new(store, engine),
    };

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let ledger_routes = Router::new()
        .route("/", get(ledger::dashboard))
        .route("/calculate", post(ledger::calculate))
        .route("/save", post(ledger::save_booking))
        .route("/update", post(ledger::update_booking))
        .route("/balance", post(ledger::balance))
        .route("/bookings/:booking_id", get(ledger::get_booking))
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(health_routes)
        .merge(ledger_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
