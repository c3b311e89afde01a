use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use slotbook_core::{
    errors::SlotError,
    models::session::{LoginRequest, LoginResponse, SessionResponse},
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    middleware::{auth::AdminSession, error_handling::AppError},
    ApiState,
};

fn auth_disabled() -> AppError {
    AppError(SlotError::Authentication(
        "admin authentication is not configured".to_string(),
    ))
}

/// Exchanges admin credentials for a session token
#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let sessions = state.sessions.as_ref().ok_or_else(auth_disabled)?;
    let Json(payload) = payload.map_err(|rejection| SlotError::Validation(rejection.body_text()))?;

    match sessions.login(&payload.username, &payload.password) {
        Ok(response) => {
            info!(username = %payload.username, "Admin logged in");
            Ok(Json(response))
        }
        Err(e) => {
            warn!(username = %payload.username, "Admin login failed");
            Err(AppError(e))
        }
    }
}

/// Describes the session behind the request's bearer token
#[axum::debug_handler(state = Arc<ApiState>)]
pub async fn current_session(session: AdminSession) -> Result<Json<SessionResponse>, AppError> {
    let claims = session.0.ok_or_else(auth_disabled)?;

    Ok(Json(SessionResponse {
        expires_at: claims.expires_at(),
        username: claims.sub,
    }))
}
