//! Stateless bearer-token issuance and validation (HS256).
//!
//! The signing key is decoded once at construction and never mutated, so a single
//! `TokenService` is shared behind an `Arc` by every request.

use std::sync::Arc;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error};

use crate::services::auth::claims::{RawClaims, Role, TokenClaims};
use crate::services::auth::clock::{Clock, SystemClock};
use crate::services::auth::error::{TokenIssueError, TokenKeyError, TokenRejection};

pub const AUTHORIZATION_KEY: &str = "auth";
pub const BEARER_PREFIX: &str = "Bearer ";
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 30 * 60;

// HS256 needs at least 256 bits of key material.
const MIN_SECRET_BYTES: usize = 32;

// Standard alphabet, padding optional.
const SECRET_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Construction-time settings for [`TokenService`].
#[derive(Clone)]
pub struct TokenConfig {
    /// Base64-encoded HMAC secret.
    pub secret_base64: String,
    pub ttl_seconds: u64,
}

impl TokenConfig {
    pub fn new(secret_base64: impl Into<String>) -> Self {
        Self {
            secret_base64: secret_base64.into(),
            ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }

    pub fn with_ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the secret
        f.debug_struct("TokenConfig")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenService")
            .field("validation", &self.validation)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Result<Self, TokenKeyError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Decode the secret and build the HS256 keys.
    ///
    /// Fails if the secret is not base64 or decodes to fewer than 256 bits.
    pub fn with_clock(config: &TokenConfig, clock: Arc<dyn Clock>) -> Result<Self, TokenKeyError> {
        // Decode once; the raw bytes back both keys and are not kept.
        let secret = SECRET_ENGINE.decode(config.secret_base64.as_bytes())?;
        if secret.len() < MIN_SECRET_BYTES {
            return Err(TokenKeyError::WeakKey {
                bits: secret.len() * 8,
            });
        }

        // Signature and algorithm are checked by jsonwebtoken; expiry and claim presence
        // are checked here against `clock` so tests can move time.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            validation,
            ttl_seconds: config.ttl_seconds,
            clock,
        })
    }

    /// Issue a signed token for `subject` and return it as an `Authorization` header value
    /// (`"Bearer <jwt>"`).
    pub fn issue(&self, subject: &str, role: Role) -> Result<String, TokenIssueError> {
        // iat/exp in whole seconds, as standard JWT consumers expect.
        let iat = self.clock.now().timestamp();
        let exp = iat + self.ttl_seconds as i64;

        // `username` duplicates `sub` for consumers that read the custom claim.
        let claims = TokenClaims {
            sub: subject.to_string(),
            username: subject.to_string(),
            auth: role,
            iat,
            exp,
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                error!(error = %e, "failed to sign JWT");
                TokenIssueError::Signing(e)
            })?;

        debug!(subject, role = %role, exp, "issued access token");

        Ok(format!("{BEARER_PREFIX}{token}"))
    }

    /// Strip the `"Bearer "` prefix from an `Authorization` header value.
    ///
    /// Absent, blank, or differently-prefixed values yield `None`. The remainder is
    /// returned as-is (no trimming).
    pub fn extract_token<'a>(&self, header_value: Option<&'a str>) -> Option<&'a str> {
        let value = header_value?;
        // Blank header is the same as no header: an unauthenticated request, not an error.
        if value.trim().is_empty() {
            return None;
        }
        value.strip_prefix(BEARER_PREFIX)
    }

    /// The authentication gate: `true` only for a correctly signed, unexpired token with
    /// all claims present.
    pub fn validate(&self, token: &str) -> bool {
        match self.verify(token) {
            Ok(_) => true,
            Err(rejection) => {
                // Generic line at error level; the cause only at debug.
                error!("JWT validation failed.");
                debug!(cause = rejection.cause(), detail = %rejection, "JWT rejected");
                false
            }
        }
    }

    /// Decode the claim set after checking signature and structure.
    ///
    /// Expiry is NOT checked here; call [`TokenService::validate`] first.
    pub fn claims(&self, token: &str) -> Result<TokenClaims, TokenRejection> {
        self.decode(token)
    }

    pub fn remaining_lifetime_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenRejection> {
        let claims = self.decode(token)?;

        // Expired strictly after `exp`; no leeway.
        let now = self.clock.now().timestamp();
        if claims.exp < now {
            return Err(TokenRejection::Expired {
                expired_at: claims.exp,
                now,
            });
        }

        Ok(claims)
    }

    fn decode(&self, token: &str) -> Result<TokenClaims, TokenRejection> {
        // Nothing to parse: report as empty claims rather than a structural failure.
        if token.trim().is_empty() {
            return Err(TokenRejection::EmptyClaims("payload"));
        }

        let data =
            jsonwebtoken::decode::<RawClaims>(token, &self.decoding_key, &self.validation)?;

        into_claims(data.claims)
    }
}

fn into_claims(raw: RawClaims) -> Result<TokenClaims, TokenRejection> {
    let sub = non_blank(raw.sub, "sub")?;
    let username = non_blank(raw.username, "username")?;
    let auth = non_blank(raw.auth, AUTHORIZATION_KEY)?
        .parse::<Role>()
        .map_err(|_| TokenRejection::EmptyClaims(AUTHORIZATION_KEY))?;
    let iat = raw.iat.ok_or(TokenRejection::EmptyClaims("iat"))?;
    let exp = raw.exp.ok_or(TokenRejection::EmptyClaims("exp"))?;

    Ok(TokenClaims {
        sub,
        username,
        auth,
        iat,
        exp,
    })
}

fn non_blank(value: Option<String>, name: &'static str) -> Result<String, TokenRejection> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(TokenRejection::EmptyClaims(name)),
    }
}
