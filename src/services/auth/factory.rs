/// Factory: build `TokenService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{TokenConfig, TokenKeyError, TokenService};

pub fn build_token_service(config: &Config) -> Result<Arc<TokenService>, TokenKeyError> {
    let token_config = TokenConfig::new(config.jwt_secret_key.clone());
    let service = TokenService::new(&token_config).inspect_err(|e| {
        tracing::error!(error = %e, "JWT_SECRET_KEY cannot be used as an HS256 key");
    })?;

    Ok(Arc::new(service))
}
