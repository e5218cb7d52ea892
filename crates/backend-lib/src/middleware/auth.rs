// ============================
// crates/backend-lib/src/middleware/auth.rs
// ============================
//! Bearer-token session middleware.
//!
//! Gates every protected route: extracts the token, verifies it, resolves
//! the subject to a live account and attaches that account to the request.
//! Boundary-only: downstream handlers trust `CurrentAccount` and never see
//! the raw token.
use crate::error::AppError;
use crate::metrics as metric_keys;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use metrics::counter;
use std::sync::Arc;

use crate::account::Account;

/// The authenticated account for the current request, stored in request
/// extensions by [`require_auth`].
#[derive(Clone)]
pub struct CurrentAccount(pub Account);

/// Extract the bearer token from the Authorization header, if any.
fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Require a valid session token on the request.
///
/// Expired and malformed tokens are logged distinctly but both surface as
/// the same 401. A token whose subject no longer exists also maps to a
/// plain `Unauthenticated`, so the response never reveals whether the token
/// itself was structurally valid.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or(AppError::Unauthenticated)?;

    let account_id = match state.tokens.verify(token) {
        Ok(account_id) => account_id,
        Err(AppError::ExpiredToken) => {
            counter!(metric_keys::AUTH_REJECTED).increment(1);
            tracing::info!("auth rejected: expired token");
            return Err(AppError::ExpiredToken);
        },
        Err(err) => {
            counter!(metric_keys::AUTH_REJECTED).increment(1);
            tracing::info!("auth rejected: invalid token");
            return Err(err);
        },
    };

    let account = match state.accounts.find_by_id(account_id).await {
        Ok(account) => account,
        Err(AppError::NotFound(_)) => {
            counter!(metric_keys::AUTH_REJECTED).increment(1);
            tracing::info!(%account_id, "auth rejected: account no longer exists");
            return Err(AppError::Unauthenticated);
        },
        Err(other) => return Err(other),
    };

    request.extensions_mut().insert(CurrentAccount(account));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_auth(value: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_token_extraction() {
        let request = request_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&request), Some("abc.def.ghi"));

        // Missing header
        assert_eq!(bearer_token(&request_with_auth(None)), None);

        // Wrong scheme
        let request = request_with_auth(Some("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&request), None);

        // Bearer with empty token
        let request = request_with_auth(Some("Bearer "));
        assert_eq!(bearer_token(&request), None);
    }
}
