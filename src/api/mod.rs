//! Clinicbook REST API
//!
//! HTTP API layer for the clinic, built with Axum.
//!
//! # Endpoints
//!
//! ## Appointments
//! - `POST /api/appointments` - Submit a booking request
//! - `GET /api/appointments` - List appointments (admin)
//! - `PATCH /api/appointments/:id/status` - Change an appointment's status (admin)
//!
//! ## Gallery
//! - `GET /api/gallery` - List gallery images
//! - `POST /api/gallery` - Add an image by URL (admin)
//! - `DELETE /api/gallery/:id` - Delete an image (admin)
//!
//! ## Admin
//! - `POST /api/admin/login` - Obtain a bearer token
//! - `POST /api/admin/logout` - Revoke the current token
//! - `POST /api/admin/change-password` - Change password
//!
//! ## Health
//! - `GET /api` - Service banner
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! Routes marked (admin) need `Authorization: Bearer <token>`.
//!
//! # Example
//!
//! ```rust,ignore
//! use clinicbook::api::{serve, AppState};
//! use clinicbook::auth::AdminAuth;
//! use clinicbook::config::ApiConfig;
//! use clinicbook::storage::ClinicStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(ClinicStore::open("./clinicbook_data")?);
//!     let auth = Arc::new(AdminAuth::new(Arc::clone(&store), chrono::Duration::hours(8)));
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, auth, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use extract::{AdminSession, ApiJson};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/", get(routes::health::root))
        // Appointment routes
        .route(
            "/appointments",
            get(routes::appointments::list_appointments)
                .post(routes::appointments::create_appointment),
        )
        .route(
            "/appointments/:id/status",
            patch(routes::appointments::update_appointment_status),
        )
        // Gallery routes
        .route(
            "/gallery",
            get(routes::gallery::list_gallery_images).post(routes::gallery::create_gallery_image),
        )
        .route("/gallery/:id", delete(routes::gallery::delete_gallery_image))
        // Admin routes
        .route("/admin/login", post(routes::admin::login))
        .route("/admin/logout", post(routes::admin::logout))
        .route("/admin/change-password", post(routes::admin::change_password))
        .layer(DefaultBodyLimit::max(state.config.max_body_size));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config);
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the configured origins, or any origin when none are configured
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    serve_on(listener, state).await
}

/// Serve on an already-bound listener until a shutdown signal arrives
pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<(), ApiError> {
    let router = build_router(state);

    tracing::info!("Clinicbook API listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Clinicbook API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
