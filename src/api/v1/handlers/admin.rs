use axum::Json;
use serde_json::{Value, json};

use crate::api::v1::extractors::AuthCtxExtractor;
use crate::error::AppError;

/// GET /admin/ping: ADMIN role only.
pub async fn admin_ping(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Result<Json<Value>, AppError> {
    if !ctx.role.is_admin() {
        tracing::debug!(username = %ctx.username, role = %ctx.role, "admin route refused");
        return Err(AppError::Forbidden);
    }

    Ok(Json(json!({"status": "ok"})))
}
