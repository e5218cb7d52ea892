//! Service-level tests for registration, login and session verification.

use backend_lib::auth::{AccountService, TokenService};
use backend_lib::error::AppError;
use backend_lib::storage::FlatFileStore;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

fn service(dir: &std::path::Path) -> AccountService {
    let store = Arc::new(FlatFileStore::new(dir).unwrap());
    let tokens = TokenService::new("test-secret", Duration::from_secs(3600));
    AccountService::new(store, tokens, 6)
}

#[tokio::test]
async fn test_register_issues_verifiable_token() {
    let dir = tempdir().unwrap();
    let service = service(dir.path());
    let tokens = TokenService::new("test-secret", Duration::from_secs(3600));

    let (account, token) = service
        .register("a@x.com", "Ann", "secret1")
        .await
        .unwrap();

    assert_eq!(account.email, "a@x.com");
    assert_eq!(account.name, "Ann");
    assert_ne!(account.password_hash, "secret1");

    let subject = tokens.verify(&token).unwrap();
    assert_eq!(subject, account.id);
}

#[tokio::test]
async fn test_register_validation() {
    let dir = tempdir().unwrap();
    let service = service(dir.path());

    let cases = [
        ("", "Ann", "secret1"),
        ("not-an-email", "Ann", "secret1"),
        ("a@x.com", "", "secret1"),
        ("a@x.com", "Ann", ""),
        ("a@x.com", "Ann", "short"),
    ];
    for (email, name, password) in cases {
        let err = service.register(email, name, password).await.unwrap_err();
        assert!(
            matches!(err, AppError::Validation(_)),
            "expected validation error for ({email}, {name}, {password})"
        );
    }
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let dir = tempdir().unwrap();
    let service = service(dir.path());

    service
        .register("a@x.com", "Ann", "secret1")
        .await
        .unwrap();

    let err = service
        .register("A@X.com", "Other Ann", "secret2")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail));
}

#[tokio::test]
async fn test_login_and_verify_session() {
    let dir = tempdir().unwrap();
    let service = service(dir.path());

    let (registered, _) = service
        .register("a@x.com", "Ann", "secret1")
        .await
        .unwrap();

    // Email lookup is case-insensitive at login too
    let (logged_in, token) = service.login("A@x.COM", "secret1").await.unwrap();
    assert_eq!(logged_in.id, registered.id);
    assert!(!token.is_empty());

    let account = service.verify_session(registered.id).await.unwrap();
    assert_eq!(account.email, "a@x.com");

    let err = service.verify_session(uuid::Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_credential_opacity() {
    let dir = tempdir().unwrap();
    let service = service(dir.path());

    service
        .register("a@x.com", "Ann", "secret1")
        .await
        .unwrap();

    // Unknown email and wrong password must produce the identical outcome
    let unknown = service.login("nobody@x.com", "secret1").await.unwrap_err();
    let wrong = service.login("a@x.com", "wrong-password").await.unwrap_err();

    assert!(matches!(unknown, AppError::InvalidCredentials));
    assert!(matches!(wrong, AppError::InvalidCredentials));
    assert_eq!(unknown.error_code(), wrong.error_code());
    assert_eq!(unknown.sanitized_message(), wrong.sanitized_message());
    assert_eq!(unknown.status_code(), wrong.status_code());
}
