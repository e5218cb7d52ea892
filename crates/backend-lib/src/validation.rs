// ============================
// crates/backend-lib/src/validation.rs
// ============================
//! Request input validation.

use crate::error::AppError;
use regex::Regex;
use std::sync::LazyLock;

// Common validation constants
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit
const MAX_NAME_LENGTH: usize = 100;
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_SCHEME_CODE_LENGTH: usize = 50;
const MAX_SCHEME_NAME_LENGTH: usize = 300;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, AppError>;

/// Normalize an email for storage and lookup: trim whitespace, lowercase.
/// Email uniqueness is case-insensitive, so every path through the system
/// must go through this before touching the store.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate an email address, returning the normalized form.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = normalize_email(email);

    if email.is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(AppError::Validation(format!(
            "email cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(&email) {
        return Err(AppError::Validation(
            "email is not a valid address".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a display name.
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }

    Ok(name.to_string())
}

/// Validate a password against the configured minimum length.
pub fn validate_password(password: &str, min_length: usize) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(AppError::Validation("password is required".to_string()));
    }

    if password.len() < min_length {
        return Err(AppError::Validation(format!(
            "password must be at least {min_length} characters"
        )));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "password cannot exceed {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Validate a scheme code. The code is opaque to us (it comes from the
/// external fund data provider), so only emptiness and length are checked.
pub fn validate_scheme_code(scheme_code: &str) -> ValidationResult<()> {
    if scheme_code.trim().is_empty() {
        return Err(AppError::Validation("scheme code is required".to_string()));
    }

    if scheme_code.len() > MAX_SCHEME_CODE_LENGTH {
        return Err(AppError::Validation(format!(
            "scheme code cannot exceed {MAX_SCHEME_CODE_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Validate a scheme display name.
pub fn validate_scheme_name(scheme_name: &str) -> ValidationResult<()> {
    if scheme_name.trim().is_empty() {
        return Err(AppError::Validation("scheme name is required".to_string()));
    }

    if scheme_name.len() > MAX_SCHEME_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "scheme name cannot exceed {MAX_SCHEME_NAME_LENGTH} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email("a@x.com").unwrap(), "a@x.com");
        // Normalization lowercases and trims
        assert_eq!(validate_email("  Ann@Example.COM ").unwrap(), "ann@example.com");

        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("Ann").unwrap(), "Ann");
        assert_eq!(validate_name("  Ann  ").unwrap(), "Ann");
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret1", 6).is_ok());
        assert!(validate_password("secret", 6).is_ok());
        assert!(validate_password("short", 6).is_err());
        assert!(validate_password("", 6).is_err());
        assert!(validate_password(&"x".repeat(129), 6).is_err());
    }

    #[test]
    fn test_validate_scheme_fields() {
        assert!(validate_scheme_code("100").is_ok());
        assert!(validate_scheme_code("").is_err());
        assert!(validate_scheme_code("   ").is_err());
        assert!(validate_scheme_code(&"9".repeat(51)).is_err());

        assert!(validate_scheme_name("Alpha Fund").is_ok());
        assert!(validate_scheme_name("").is_err());
    }
}
