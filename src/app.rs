/*
 * Responsibility
 * - tracing + panic hook
 * - Config -> services -> AppState -> Router
 * - axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::build_token_service;
use crate::services::credentials::InMemoryCredentials;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins; e.g. RUST_LOG=info,preonboarding_auth=debug,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        // In development, fail fast so the panic is noticed immediately.
        // In production, fall back to the default hook and keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    // Decide panic behavior from APP_ENV.
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting auth API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

pub fn build_state(config: &Config) -> Result<AppState> {
    // The signing key is decoded once here; a bad secret stops startup.
    let tokens = build_token_service(config).context("invalid JWT_SECRET_KEY")?;

    // Credential directory comes from AUTH_USERS; swap in another CredentialVerifier here.
    let credentials = InMemoryCredentials::new(config.users.iter().cloned());
    if credentials.is_empty() {
        tracing::warn!("AUTH_USERS is empty; every login will fail");
    } else {
        tracing::info!(users = credentials.len(), "loaded credential directory");
    }

    Ok(AppState::new(tokens, Arc::new(credentials)))
}

pub fn build_router(state: AppState) -> Router {
    async fn health() -> &'static str {
        "ok"
    }

    // Liveness at the root, versioned API under /api/v1, cross-cutting layers outermost.
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router)
}
