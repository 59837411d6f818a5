use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::{
    errors::AppError,
    extractors::AppJson,
    middlewares::auth::{JwtClaims, JwtService},
    models::user::{RequestOtpRequest, VerifyOtpRequest},
    services::{auth_service::AuthService, email_service::EmailService, AppState},
};

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(
        state.db.clone(),
        JwtService::new(&state.config.jwt_secret),
        EmailService::new(state.config.smtp.clone()),
    )
}

/// POST /api/auth/request-otp
pub async fn request_otp(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RequestOtpRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(e) = req.validate() {
        return Err(AppError::validation(format!("Validation error: {}", e)));
    }
    let email = req
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::validation("email required"))?;

    tracing::info!("OTP requested for {}", email);

    auth_service(&state).request_otp(email).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "OTP sent (check server log or email)"
    })))
}

/// POST /api/auth/verify-otp
pub async fn verify_otp(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<VerifyOtpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = auth_service(&state).verify_otp(req).await?;
    tracing::info!("User {} verified via OTP", response.user.email);
    Ok(Json(response))
}

/// GET /api/me
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<impl IntoResponse, AppError> {
    let user = auth_service(&state).current_user(&claims).await?;
    Ok(Json(user))
}
