/*
 * Responsibility
 * - /login request/response DTO
 * - field rules via Validate (checked by ValidatedJson before the handler runs)
 */
use serde::{Deserialize, Serialize};

use crate::api::v1::extractors::Validate;
use crate::error::FieldErrors;

const USERNAME_MAX_CHARS: usize = 32;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.username.trim().is_empty() {
            errors.add("username", "username is required");
        } else if self.username.chars().count() > USERNAME_MAX_CHARS {
            errors.add("username", "username must be <= 32 chars");
        }
        if self.password.trim().is_empty() {
            errors.add("password", "password is required");
        }

        errors.into_result()
    }
}

/// The token itself travels in the `Authorization` response header.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Always "Bearer"
    pub token_type: &'static str,
    /// Seconds until expiry.
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn accepts_filled_fields() {
        assert!(req("alice", "secret").validate().is_ok());
    }

    #[test]
    fn first_error_is_the_username() {
        let errors = req(" ", "").validate().unwrap_err();
        let first = errors.first().unwrap();
        assert_eq!(first.field, "username");
        assert_eq!(first.message, "username is required");
    }

    #[test]
    fn long_username_is_rejected() {
        let errors = req(&"a".repeat(33), "secret").validate().unwrap_err();
        assert_eq!(errors.first().unwrap().message, "username must be <= 32 chars");
    }

    #[test]
    fn blank_password_is_rejected() {
        let errors = req("alice", "   ").validate().unwrap_err();
        assert_eq!(errors.first().unwrap().field, "password");
    }
}
