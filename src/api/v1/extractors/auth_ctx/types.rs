/*
 * Responsibility
 * - Type of the "authenticated context" handlers see
 * - The access middleware validates the token and stores this in request extensions
 */
use chrono::{DateTime, Utc};

use crate::services::auth::{Role, TokenClaims};

/// Context attached to an authenticated request.
///
/// - `username` is the token subject
/// - `role` is the only authorization signal the token carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub username: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampOutOfRange;

impl TryFrom<TokenClaims> for AuthCtx {
    type Error = TimestampOutOfRange;

    fn try_from(claims: TokenClaims) -> Result<Self, Self::Error> {
        let issued_at = claims.issued_at().ok_or(TimestampOutOfRange)?;
        let expires_at = claims.expires_at().ok_or(TimestampOutOfRange)?;

        Ok(Self {
            username: claims.sub,
            role: claims.auth,
            issued_at,
            expires_at,
        })
    }
}
