//! API Routes
//!
//! Route handlers organized by functionality.

pub mod admin;
pub mod appointments;
pub mod gallery;
pub mod health;
