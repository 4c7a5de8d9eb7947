/*
 * Responsibility
 * - Verify (username, password) for the login endpoint and return the user's role
 * - The directory is a seam: the in-memory implementation below is fed from AUTH_USERS
 */
use std::{collections::HashMap, future::Future, pin::Pin};

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

use crate::services::auth::Role;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Identity confirmed by a [`CredentialVerifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("user not found: {0}")]
    UnknownUser(String),

    #[error("password does not match")]
    PasswordMismatch,

    /// Directory refused the login for its own reasons (locked account, backend refusal).
    ///
    /// `InMemoryCredentials` never returns this; it exists for external directory
    /// implementations plugged in behind `CredentialVerifier`. Maps to `AppError::LoginFailed`.
    #[error("login rejected: {0}")]
    Rejected(String),
}

pub trait CredentialVerifier: Send + Sync {
    fn verify<'a>(
        &'a self,
        username: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<Identity, CredentialError>>;
}

/// One configured account: lowercase hex SHA-256 of the password plus the role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntry {
    pub username: String,
    pub password_sha256: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentials {
    users: HashMap<String, UserEntry>,
}

impl InMemoryCredentials {
    pub fn new(entries: impl IntoIterator<Item = UserEntry>) -> Self {
        let users = entries
            .into_iter()
            .map(|e| (e.username.clone(), e))
            .collect();
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialVerifier for InMemoryCredentials {
    fn verify<'a>(
        &'a self,
        username: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<Identity, CredentialError>> {
        Box::pin(async move {
            let entry = self.users.get(username).ok_or_else(|| {
                debug!(username, "login for unknown user");
                CredentialError::UnknownUser(username.to_string())
            })?;

            if !entry
                .password_sha256
                .eq_ignore_ascii_case(&password_digest(password))
            {
                debug!(username, "password mismatch");
                return Err(CredentialError::PasswordMismatch);
            }

            Ok(Identity {
                username: entry.username.clone(),
                role: entry.role,
            })
        })
    }
}

/// sha256(password) as lowercase hex.
pub fn password_digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> InMemoryCredentials {
        InMemoryCredentials::new([
            UserEntry {
                username: "alice".into(),
                password_sha256: password_digest("wonderland"),
                role: Role::User,
            },
            UserEntry {
                username: "root".into(),
                password_sha256: password_digest("toor").to_ascii_uppercase(),
                role: Role::Admin,
            },
        ])
    }

    #[test]
    fn digest_is_lowercase_hex_sha256() {
        assert_eq!(
            password_digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn known_user_with_right_password_is_verified() {
        let id = directory().verify("alice", "wonderland").await.unwrap();
        assert_eq!(
            id,
            Identity {
                username: "alice".into(),
                role: Role::User
            }
        );
    }

    #[tokio::test]
    async fn stored_digest_case_does_not_matter() {
        let id = directory().verify("root", "toor").await.unwrap();
        assert_eq!(id.role, Role::Admin);
    }

    #[tokio::test]
    async fn wrong_password_is_a_mismatch() {
        let err = directory().verify("alice", "nope").await.unwrap_err();
        assert_eq!(err, CredentialError::PasswordMismatch);
    }

    #[tokio::test]
    async fn unknown_user_is_reported() {
        let err = directory().verify("bob", "x").await.unwrap_err();
        assert_eq!(err, CredentialError::UnknownUser("bob".into()));
    }
}
