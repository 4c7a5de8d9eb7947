/*
 * Responsibility
 * - POST /login: verify credentials, issue a bearer token
 * - token goes out in the Authorization header, lifetime in the body
 */
use axum::{
    Json,
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode, header},
};
use tracing::info;

use crate::api::v1::dto::login::{LoginRequest, LoginResponse};
use crate::api::v1::extractors::ValidatedJson;
use crate::error::AppError;
use crate::services::auth::BEARER_PREFIX;
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, [(HeaderName, HeaderValue); 1], Json<LoginResponse>), AppError> {
    let identity = state
        .credentials
        .verify(&req.username, &req.password)
        .await?;

    let bearer = state.tokens.issue(&identity.username, identity.role)?;
    let bearer = HeaderValue::from_str(&bearer).map_err(|_| AppError::Internal)?;

    info!(username = %identity.username, role = %identity.role, "login succeeded");

    Ok((
        StatusCode::OK,
        [(header::AUTHORIZATION, bearer)],
        Json(LoginResponse {
            token_type: BEARER_PREFIX.trim_end(),
            expires_in: state.tokens.remaining_lifetime_seconds(),
        }),
    ))
}
