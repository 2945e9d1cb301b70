//! Clinicbook Storage
//!
//! This module provides the persistence store for the clinic:
//!
//! - **types**: Record types (Appointment, GalleryImage) and their inputs
//! - **store**: SQLite-backed store owning both collections plus admin accounts
//! - **seed**: Initial gallery catalogue
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use clinicbook::storage::{AppointmentStatus, ClinicStore, NewAppointment};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ClinicStore::open("./clinicbook_data")?;
//!
//!     let appointment = store.create_appointment(
//!         NewAppointment::new("Asha", "9876543210", "2024-06-01", "Dental Cleaning")
//!             .time("10:00 AM"),
//!     )?;
//!
//!     store.update_appointment_status(&appointment.id, AppointmentStatus::Confirmed)?;
//!     println!("{} appointments", store.list_appointments()?.len());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod seed;
pub mod store;
pub mod types;

pub use error::{StorageError, StorageResult};
pub use seed::{default_gallery, seed_gallery};
pub use store::{AdminUser, ClinicStore, Session, StoreCounts};
pub use types::{
    Appointment, AppointmentStatus, GalleryImage, ImageCategory, NewAppointment, NewGalleryImage,
};
