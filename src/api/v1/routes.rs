/*
 * Responsibility
 * - v1 URL layout
 * - public: /health, /login
 * - bearer-protected: /me, /admin/ping
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{admin::admin_ping, health::health, login::login, me::me};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/login", post(login));

    let protected = Router::new()
        .route("/me", get(me))
        .route("/admin/ping", get(admin_ping));
    let protected = middleware::auth::access::apply(protected, state);

    public.merge(protected)
}
