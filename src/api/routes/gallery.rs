//! Gallery Routes
//!
//! - GET /api/gallery - List images in insertion order (public)
//! - POST /api/gallery - Add an image by URL (admin)
//! - DELETE /api/gallery/:id - Remove an image (admin)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::CreateGalleryImageRequest;
use crate::api::error::ApiResult;
use crate::api::extract::{AdminSession, ApiJson};
use crate::api::state::AppState;
use crate::storage::{GalleryImage, ImageCategory, NewGalleryImage};

/// GET /api/gallery
pub async fn list_gallery_images(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<GalleryImage>>> {
    let images = state.store.list_gallery_images()?;
    Ok(Json(images))
}

/// POST /api/gallery
pub async fn create_gallery_image(
    State(state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
    ApiJson(req): ApiJson<CreateGalleryImageRequest>,
) -> ApiResult<(StatusCode, Json<GalleryImage>)> {
    let category = parse_category(req.category.as_deref())?;
    let image = state
        .store
        .create_gallery_image(NewGalleryImage::new(req.url, req.title, category))?;

    tracing::info!(
        image_id = %image.id,
        category = %image.category,
        admin = %session.username,
        "Gallery image added"
    );

    Ok((StatusCode::CREATED, Json(image)))
}

/// DELETE /api/gallery/:id
pub async fn delete_gallery_image(
    State(state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete_gallery_image(&id)?;

    tracing::info!(image_id = %id, admin = %session.username, "Gallery image deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Absent or blank category falls back to clinic
fn parse_category(raw: Option<&str>) -> ApiResult<ImageCategory> {
    match raw.map(str::trim) {
        None | Some("") => Ok(ImageCategory::default()),
        Some(s) => Ok(s.parse()?),
    }
}
