//! Admin Routes
//!
//! - POST /api/admin/login - Exchange credentials for a bearer token
//! - POST /api/admin/logout - Revoke the current token
//! - POST /api/admin/change-password - Change the current operator's password

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{
    ChangePasswordRequest, ChangePasswordResponse, LoginRequest, LoginResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::{AdminSession, ApiJson};
use crate::api::state::AppState;

/// POST /api/admin/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let auth = Arc::clone(&state.auth);
    let session = run_blocking(move || auth.login(&req.username, &req.password)).await??;
    Ok(Json(session.into()))
}

/// POST /api/admin/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
) -> ApiResult<StatusCode> {
    state.auth.logout(&session)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/change-password
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> ApiResult<Json<ChangePasswordResponse>> {
    let auth = Arc::clone(&state.auth);
    run_blocking(move || auth.change_password(&session, &req.old_password, &req.new_password))
        .await??;

    Ok(Json(ChangePasswordResponse {
        success: true,
        message: "Password changed successfully".to_string(),
    }))
}

/// Run Argon2 work on the blocking pool
async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("Password task failed: {}", e)))
}
