// ============================
// crates/backend-lib/src/handlers/funds.rs
// ============================
//! Saved-fund handlers. All routes here sit behind the session middleware
//! and operate only on the authenticated account's own portfolio.
use crate::error::AppError;
use crate::middleware::CurrentAccount;
use crate::validation;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use fundflow_common::{MessageResponse, SaveFundRequest, SaveFundResponse, SavedFund};
use std::sync::Arc;

/// POST /api/funds/save
pub async fn save_fund(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Json(body): Json<SaveFundRequest>,
) -> Result<(StatusCode, Json<SaveFundResponse>), AppError> {
    validation::validate_scheme_code(&body.scheme_code)?;
    validation::validate_scheme_name(&body.scheme_name)?;

    let entry = state
        .portfolio
        .add(account.id, &body.scheme_code, &body.scheme_name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SaveFundResponse {
            message: "Fund saved successfully".to_string(),
            fund: entry.into(),
        }),
    ))
}

/// GET /api/funds/saved
///
/// Returns the account's saved funds, most recently saved first.
pub async fn list_saved(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
) -> Result<Json<Vec<SavedFund>>, AppError> {
    let entries = state.portfolio.list(account.id).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// DELETE /api/funds/saved/{schemeCode}
pub async fn remove_saved(
    State(state): State<Arc<AppState>>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Path(scheme_code): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.portfolio.remove(account.id, &scheme_code).await?;

    Ok(Json(MessageResponse {
        message: "Fund removed successfully".to_string(),
    }))
}
