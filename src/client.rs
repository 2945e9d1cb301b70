//! Clinicbook API Client
//!
//! HTTP client for the clinic API, configured with a single base URL
//! (the server root; `/api` is appended here). Used by the operator CLI.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::api::dto::{
    ChangePasswordRequest, ChangePasswordResponse, CreateAppointmentRequest,
    CreateGalleryImageRequest, HealthResponse, LoginRequest, LoginResponse, RootResponse,
    UpdateStatusRequest,
};
use crate::api::ErrorResponse;
use crate::storage::{Appointment, AppointmentStatus, GalleryImage, ImageCategory, NewAppointment};

/// Errors returned by [`ClinicClient`]
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure or undecodable response
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server rejected the input (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Target record does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or expired token, or bad credentials (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// REST client for the clinic API
pub struct ClinicClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ClinicClient {
    /// Create a client for a server root such as `http://localhost:8001`
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Builder method: authenticate admin calls with an existing token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET /api
    pub async fn root(&self) -> ClientResult<RootResponse> {
        let response = self.client.get(self.api_url("")).send().await?;
        parse(response).await
    }

    /// GET /health
    pub async fn health(&self) -> ClientResult<HealthResponse> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        parse(response).await
    }

    // ============================================
    // APPOINTMENTS
    // ============================================

    pub async fn create_appointment(&self, input: NewAppointment) -> ClientResult<Appointment> {
        let body = CreateAppointmentRequest::from(input);
        let response = self
            .client
            .post(self.api_url("/appointments"))
            .json(&body)
            .send()
            .await?;
        parse(response).await
    }

    pub async fn list_appointments(&self) -> ClientResult<Vec<Appointment>> {
        let response = self
            .authorized(self.client.get(self.api_url("/appointments")))
            .send()
            .await?;
        parse(response).await
    }

    pub async fn update_appointment_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> ClientResult<Appointment> {
        let body = UpdateStatusRequest {
            status: status.to_string(),
        };
        let response = self
            .authorized(
                self.client
                    .patch(self.api_url(&format!("/appointments/{}/status", id))),
            )
            .json(&body)
            .send()
            .await?;
        parse(response).await
    }

    // ============================================
    // GALLERY
    // ============================================

    pub async fn list_gallery_images(&self) -> ClientResult<Vec<GalleryImage>> {
        let response = self.client.get(self.api_url("/gallery")).send().await?;
        parse(response).await
    }

    /// Add an image; the server files it under clinic when `category` is None
    pub async fn create_gallery_image(
        &self,
        url: &str,
        title: &str,
        category: Option<ImageCategory>,
    ) -> ClientResult<GalleryImage> {
        let body = CreateGalleryImageRequest {
            url: url.to_string(),
            title: title.to_string(),
            category: category.map(|c| c.to_string()),
        };
        let response = self
            .authorized(self.client.post(self.api_url("/gallery")))
            .json(&body)
            .send()
            .await?;
        parse(response).await
    }

    pub async fn delete_gallery_image(&self, id: &str) -> ClientResult<()> {
        let response = self
            .authorized(self.client.delete(self.api_url(&format!("/gallery/{}", id))))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    // ============================================
    // ADMIN
    // ============================================

    /// Log in and keep the issued token for subsequent admin calls
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .client
            .post(self.api_url("/admin/login"))
            .json(&body)
            .send()
            .await?;

        let login: LoginResponse = parse(response).await?;
        self.token = Some(login.token.clone());
        Ok(login)
    }

    /// Revoke the current token and forget it
    pub async fn logout(&mut self) -> ClientResult<()> {
        let response = self
            .authorized(self.client.post(self.api_url("/admin/logout")))
            .send()
            .await?;
        check(response).await?;
        self.token = None;
        Ok(())
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> ClientResult<ChangePasswordResponse> {
        let body = ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        let response = self
            .authorized(self.client.post(self.api_url("/admin/change-password")))
            .json(&body)
            .send()
            .await?;
        parse(response).await
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let response = check(response).await?;
    Ok(response.json().await?)
}

/// Turn a non-success response into the matching error
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = error_message(&text);

    Err(match status {
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

/// Extract the message from an API error body, falling back to the raw text
fn error_message(text: &str) -> String {
    serde_json::from_str::<ErrorResponse>(text)
        .map(|body| body.error.message)
        .unwrap_or_else(|_| text.to_string())
}
