//! Bearer token gate: `Authorization` header → extract → validate → claims → `AuthCtx`.
//!
//! Any miss (no header, wrong scheme, invalid or expired token) is a plain 401; the
//! specific cause is only logged by `TokenService::validate`.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Put the bearer gate in front of every route already registered on `router`.
///
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: unknown paths stay 404 instead of turning into 401
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(token) = state.tokens.extract_token(header_value) else {
        tracing::debug!("no bearer token on protected route");
        return Err(AppError::Unauthorized);
    };

    if !state.tokens.validate(token) {
        return Err(AppError::Unauthorized);
    }

    let claims = state.tokens.claims(token).map_err(|err| {
        tracing::warn!(error = %err, "validated token could not be decoded");
        AppError::Unauthorized
    })?;

    let auth_ctx = AuthCtx::try_from(claims).map_err(|_| AppError::Unauthorized)?;

    // middleware → extractor
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}
