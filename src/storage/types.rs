//! Core record types for the clinic store
//!
//! This module defines the two persisted collections and their inputs:
//! - `Appointment`: a patient's booking request with a lifecycle status
//! - `GalleryImage`: a reference to an externally hosted image
//! - `NewAppointment` / `NewGalleryImage`: unvalidated creation input

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::storage::error::{StorageError, StorageResult};

/// Lifecycle status of an appointment
///
/// Any status may be set from any other; there is no enforced workflow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Newly submitted, not yet reviewed
    #[default]
    Pending,
    /// Accepted by the clinic
    Confirmed,
    /// Rejected or withdrawn
    Cancelled,
}

impl AppointmentStatus {
    /// Get all statuses for iteration
    pub fn all() -> &'static [AppointmentStatus] {
        &[
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Cancelled,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            _ => Err(StorageError::Validation(format!(
                "Invalid status: {}. Use pending, confirmed, or cancelled",
                s
            ))),
        }
    }
}

/// Category a gallery image is filed under
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageCategory {
    /// Rooms and reception
    #[default]
    Clinic,
    /// Chairs, imaging and instruments
    Equipment,
    /// Dentists and staff
    Team,
    /// Patient care moments
    Patients,
}

impl ImageCategory {
    /// Get all categories for iteration
    pub fn all() -> &'static [ImageCategory] {
        &[
            ImageCategory::Clinic,
            ImageCategory::Equipment,
            ImageCategory::Team,
            ImageCategory::Patients,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageCategory::Clinic => "clinic",
            ImageCategory::Equipment => "equipment",
            ImageCategory::Team => "team",
            ImageCategory::Patients => "patients",
        }
    }
}

impl std::fmt::Display for ImageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageCategory {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clinic" => Ok(ImageCategory::Clinic),
            "equipment" => Ok(ImageCategory::Equipment),
            "team" => Ok(ImageCategory::Team),
            "patients" => Ok(ImageCategory::Patients),
            _ => Err(StorageError::Validation(format!(
                "Invalid category: {}. Use clinic, equipment, team, or patients",
                s
            ))),
        }
    }
}

/// A stored appointment request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Unique, immutable identifier
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Requested day, as entered by the patient
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    /// Service name from the clinic's catalogue
    pub service: String,
    #[serde(default)]
    pub message: Option<String>,
    pub status: AppointmentStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A stored gallery entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryImage {
    /// Unique, immutable identifier
    pub id: String,
    /// External image location (not re-hosted)
    pub url: String,
    pub title: String,
    pub category: ImageCategory,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Input for creating an appointment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewAppointment {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub date: String,
    pub time: Option<String>,
    pub service: String,
    pub message: Option<String>,
}

impl NewAppointment {
    /// Create an input with the required fields set
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        date: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            date: date.into(),
            service: service.into(),
            ..Default::default()
        }
    }

    /// Builder method: set email
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builder method: set preferred time
    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Builder method: set free-text message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Check that every required field is present and non-blank
    pub fn validate(&self) -> StorageResult<()> {
        require("name", &self.name)?;
        require("phone", &self.phone)?;
        require("date", &self.date)?;
        require("service", &self.service)?;
        Ok(())
    }

    /// Build the stored record, assigning id, status and timestamp
    pub(crate) fn into_appointment(self) -> Appointment {
        Appointment {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            phone: self.phone,
            email: non_blank(self.email),
            date: self.date,
            time: non_blank(self.time),
            service: self.service,
            message: non_blank(self.message),
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

/// Input for creating a gallery image
#[derive(Debug, Clone, PartialEq)]
pub struct NewGalleryImage {
    pub url: String,
    pub title: String,
    pub category: ImageCategory,
}

impl NewGalleryImage {
    pub fn new(url: impl Into<String>, title: impl Into<String>, category: ImageCategory) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            category,
        }
    }

    pub fn validate(&self) -> StorageResult<()> {
        require("url", &self.url)?;
        require("title", &self.title)?;
        Ok(())
    }

    pub(crate) fn into_image(self) -> GalleryImage {
        GalleryImage {
            id: uuid::Uuid::new_v4().to_string(),
            url: self.url,
            title: self.title,
            category: self.category,
            created_at: Utc::now(),
        }
    }
}

fn require(field: &str, value: &str) -> StorageResult<()> {
    if value.trim().is_empty() {
        return Err(StorageError::Validation(format!(
            "Field '{}' is required and cannot be empty",
            field
        )));
    }
    Ok(())
}

/// Optional text supplied as an empty string is stored as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
