//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! Record responses serialize the storage types directly; the request types
//! here default every field so a missing field surfaces as a validation
//! error rather than a deserialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{NewAppointment, Session};

// ============================================
// APPOINTMENT DTOs
// ============================================

/// Booking form submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<CreateAppointmentRequest> for NewAppointment {
    fn from(req: CreateAppointmentRequest) -> Self {
        NewAppointment {
            name: req.name,
            phone: req.phone,
            email: req.email,
            date: req.date,
            time: req.time,
            service: req.service,
            message: req.message,
        }
    }
}

impl From<NewAppointment> for CreateAppointmentRequest {
    fn from(input: NewAppointment) -> Self {
        CreateAppointmentRequest {
            name: input.name,
            phone: input.phone,
            email: input.email,
            date: input.date,
            time: input.time,
            service: input.service,
            message: input.message,
        }
    }
}

/// Status change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// pending, confirmed or cancelled
    #[serde(default)]
    pub status: String,
}

// ============================================
// GALLERY DTOs
// ============================================

/// New gallery entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGalleryImageRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    /// clinic, equipment, team or patients; defaults to clinic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

// ============================================
// ADMIN DTOs
// ============================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Issued session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for the Authorization header
    pub token: String,
    pub username: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

impl From<Session> for LoginResponse {
    fn from(session: Session) -> Self {
        LoginResponse {
            token: session.token,
            username: session.username,
            expires_at: session.expires_at,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default, rename = "oldPassword", alias = "old_password")]
    pub old_password: String,
    #[serde(default, rename = "newPassword", alias = "new_password")]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordResponse {
    pub success: bool,
    pub message: String,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Service banner at the API root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    /// Always "active"
    pub status: String,
}

/// Full health status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// healthy or unhealthy
    pub status: String,
    /// ok or error
    pub storage: String,
    pub appointments: u64,
    pub gallery_images: u64,
    pub uptime_seconds: u64,
    pub version: String,
}
