/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Cheap to clone: every field is behind an Arc
 */
use std::sync::Arc;

use crate::services::{auth::TokenService, credentials::CredentialVerifier};

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub credentials: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(tokens: Arc<TokenService>, credentials: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            tokens,
            credentials,
        }
    }
}
