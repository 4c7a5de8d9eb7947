use thiserror::Error;

/// Failures while turning the configured secret into a signing key.
///
/// Any of these is fatal at startup.
#[derive(Debug, Error)]
pub enum TokenKeyError {
    #[error("signing secret is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("signing secret is too short for HS256: {bits} bits (need at least 256)")]
    WeakKey { bits: usize },
}

#[derive(Debug, Error)]
pub enum TokenIssueError {
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Why a presented token was refused.
///
/// Callers only ever see the `validate` boolean; this is kept for logs.
#[derive(Debug, Error)]
pub enum TokenRejection {
    /// Broken compact serialization, bad base64/JSON, or signature mismatch.
    #[error("invalid JWT signature or structure: {0}")]
    Malformed(jsonwebtoken::errors::Error),

    #[error("expired JWT token (exp={expired_at}, now={now})")]
    Expired { expired_at: i64, now: i64 },

    /// Well-formed token of a kind this service does not accept (e.g. another algorithm).
    #[error("unsupported JWT token: {0}")]
    Unsupported(jsonwebtoken::errors::Error),

    #[error("JWT claims are empty or missing '{0}'")]
    EmptyClaims(&'static str),
}

impl TokenRejection {
    /// Short, stable label for the log `cause` field.
    pub fn cause(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed",
            Self::Expired { .. } => "expired",
            Self::Unsupported(_) => "unsupported",
            Self::EmptyClaims(_) => "empty_claims",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenRejection {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => Self::Unsupported(e),
            // Expiry and required claims are checked by TokenService against its own clock.
            _ => Self::Malformed(e),
        }
    }
}
