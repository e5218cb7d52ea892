// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Signed, time-bound session tokens.
//!
//! Tokens are stateless HS256 JWTs: the account id travels in the `sub`
//! claim and expiry is the only invalidation mechanism. There is no
//! server-side session store and no revocation list; rotating the signing
//! secret invalidates every outstanding token at once.

use crate::account::AccountId;
use crate::error::AppError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// JWT claims carried by a session token
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Account id the token was issued for
    sub: String,
    /// Issued-at, seconds since the epoch
    iat: i64,
    /// Expires-at, seconds since the epoch
    exp: i64,
}

/// Issues and verifies session tokens.
///
/// The signing secret is injected at construction and never mutated at
/// runtime; `issue` and `verify` are pure functions of it.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: a token is expired the second its exp passes.
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            validation,
        }
    }

    /// Issue a token whose subject is `account_id`, valid for the configured
    /// lifetime.
    pub fn issue(&self, account_id: AccountId) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: account_id.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))
    }

    /// Verify a token and return its subject.
    ///
    /// Distinguishes an expired-but-genuine token from a malformed or
    /// tampered one so callers can log them separately; both are surfaced
    /// to clients as the same 401.
    pub fn verify(&self, token: &str) -> Result<AccountId, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::ExpiredToken,
                _ => AppError::InvalidToken,
            }
        })?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-not-for-production";

    #[test]
    fn test_issue_then_verify_round_trip() {
        let service = TokenService::new(TEST_SECRET, Duration::from_secs(3600));
        let account_id = Uuid::new_v4();

        let token = service.issue(account_id).unwrap();
        let subject = service.verify(&token).unwrap();
        assert_eq!(subject, account_id);
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let service = TokenService::new(TEST_SECRET, Duration::from_secs(3600));
        let token = service.issue(Uuid::new_v4()).unwrap();

        // Flip a character inside the signature segment
        let mut chars: Vec<char> = token.chars().collect();
        let i = chars.len() - 5;
        chars[i] = if chars[i] == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        assert!(matches!(
            service.verify(&tampered),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let service = TokenService::new(TEST_SECRET, Duration::from_secs(3600));
        assert!(matches!(
            service.verify("not.a.jwt"),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(service.verify(""), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let service = TokenService::new(TEST_SECRET, Duration::from_secs(0));
        let token = service.issue(Uuid::new_v4()).unwrap();

        // exp == iat, so one second later the token is strictly past expiry
        std::thread::sleep(Duration::from_millis(1100));
        assert!(matches!(
            service.verify(&token),
            Err(AppError::ExpiredToken)
        ));
    }

    #[test]
    fn test_secret_rotation_invalidates_tokens() {
        let old = TokenService::new("old-secret", Duration::from_secs(3600));
        let new = TokenService::new("new-secret", Duration::from_secs(3600));

        let token = old.issue(Uuid::new_v4()).unwrap();
        assert!(matches!(new.verify(&token), Err(AppError::InvalidToken)));
    }
}
