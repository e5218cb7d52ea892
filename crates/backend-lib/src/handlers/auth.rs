// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Registration, login and session verification handlers.
use crate::error::AppError;
use crate::middleware::CurrentAccount;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Extension, Json};
use fundflow_common::{AuthResponse, LoginRequest, RegisterRequest, VerifyResponse};
use std::sync::Arc;

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let (account, token) = state
        .account_service
        .register(&body.email, &body.name, &body.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Registration successful".to_string(),
            token,
            user: account.summary(),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (account, token) = state
        .account_service
        .login(&body.email, &body.password)
        .await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: account.summary(),
    }))
}

/// GET /api/auth/verify
///
/// "Who am I" check: clients call this on startup to re-validate a locally
/// cached token. The middleware has already established identity, but the
/// account is re-read so a vanished account fails even within token expiry.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
) -> Result<Json<VerifyResponse>, AppError> {
    let account = match state.account_service.verify_session(account.id).await {
        Ok(account) => account,
        Err(AppError::NotFound(_)) => return Err(AppError::Unauthenticated),
        Err(other) => return Err(other),
    };

    Ok(Json(VerifyResponse {
        user: account.summary(),
    }))
}
