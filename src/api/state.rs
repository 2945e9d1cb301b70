//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::auth::AdminAuth;
use crate::config::ApiConfig;
use crate::storage::ClinicStore;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Store holding appointments, gallery images and operator accounts
    pub store: Arc<ClinicStore>,
    /// Operator login and session checks
    pub auth: Arc<AdminAuth>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<ClinicStore>, auth: Arc<AdminAuth>, config: ApiConfig) -> Self {
        Self {
            store,
            auth,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
