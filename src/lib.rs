//! # Clinicbook
//!
//! Appointment booking and gallery management API for a dental clinic website.
//!
//! Visitors submit booking requests and browse the clinic gallery; operators
//! log in to review appointments, change their status, and curate the gallery.
//!
//! ## Modules
//!
//! - [`storage`]: SQLite-backed store for appointments, gallery images and operator accounts
//! - [`auth`]: Server-side operator login and bearer-token sessions
//! - [`api`]: REST API server with Axum
//! - [`client`]: Typed HTTP client for the API
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clinicbook::storage::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ClinicStore::open("./clinicbook_data")?;
//!
//!     let booking = store.create_appointment(
//!         NewAppointment::new("Asha", "9876543210", "2024-06-01", "Root Canal")
//!             .email("asha@example.com"),
//!     )?;
//!     assert_eq!(booking.status, AppointmentStatus::Pending);
//!
//!     store.create_gallery_image(NewGalleryImage::new(
//!         "https://example.com/lobby.jpg",
//!         "Lobby",
//!         ImageCategory::Clinic,
//!     ))?;
//!
//!     println!("Gallery has {} images", store.list_gallery_images()?.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod logging;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{
    Appointment, AppointmentStatus, ClinicStore, GalleryImage, ImageCategory, NewAppointment,
    NewGalleryImage, StorageError, StorageResult,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use auth::{AdminAuth, AuthError};

pub use client::{ClientError, ClinicClient};

pub use config::{AdminConfig, ApiConfig, Config, ConfigError, LoggingConfig, StorageConfig};
