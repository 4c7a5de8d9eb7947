use axum::Json;

use crate::api::v1::dto::profile::ProfileResponse;
use crate::api::v1::extractors::AuthCtxExtractor;

/// GET /me: echo the identity carried by the bearer token.
pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        username: ctx.username,
        role: ctx.role,
        issued_at: ctx.issued_at,
        expires_at: ctx.expires_at,
    })
}
