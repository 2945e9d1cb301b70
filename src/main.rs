//! Clinicbook API Server
//!
//! Run with: cargo run --bin clinicbook
//!
//! # Configuration
//!
//! Read from `config.toml` (see `clinicbook-cli config`), with overrides:
//! - `CLINICBOOK_DATA_DIR`: Data directory
//! - `CLINICBOOK_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `CLINICBOOK_API_PORT`: Port to listen on (default: 8001)
//! - `CLINICBOOK_ADMIN_USERNAME`: Operator created on first start (default: admin)
//! - `CLINICBOOK_ADMIN_PASSWORD`: Its password (random and logged if unset)
//! - `CLINICBOOK_LOG_LEVEL` / `CLINICBOOK_LOG_FORMAT`: Logging (`RUST_LOG` wins)

use anyhow::Context;
use clinicbook::api::{serve, AppState};
use clinicbook::auth::AdminAuth;
use clinicbook::config::Config;
use clinicbook::storage::{seed_gallery, ClinicStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    clinicbook::logging::init(&config.logging).context("Failed to initialise logging")?;

    tracing::info!("Starting Clinicbook API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {:?}", config.storage.data_dir);

    let store = Arc::new(
        ClinicStore::open(&config.storage.data_dir).context("Failed to open clinic store")?,
    );

    if config.storage.seed_gallery {
        seed_gallery(&store).context("Failed to seed gallery")?;
    }

    let counts = store.counts()?;
    tracing::info!("Store holds {}", counts);

    let auth = Arc::new(AdminAuth::new(
        Arc::clone(&store),
        config.admin.session_ttl(),
    ));
    if let Some(generated) = auth
        .bootstrap(
            &config.admin.username,
            config.admin.initial_password.as_deref(),
        )
        .context("Failed to create initial admin account")?
    {
        tracing::warn!(
            username = %config.admin.username,
            password = %generated,
            "Generated initial admin password; change it after first login"
        );
    }

    let state = AppState::new(store, auth, config.api.clone());

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("Clinicbook API server stopped");
    Ok(())
}
