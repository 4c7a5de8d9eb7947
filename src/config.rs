/*
 * Responsibility
 * - Read environment / .env (PORT, APP_ENV, JWT_SECRET_KEY, AUTH_USERS)
 * - Validate values; anything missing or malformed stops startup
 */
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;

use crate::services::auth::Role;
use crate::services::credentials::UserEntry;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    // Base64 HMAC secret; decoded by TokenService
    pub jwt_secret_key: String,
    pub users: Vec<UserEntry>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("users", &self.users.len())
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        // Absent PORT falls back to the default; a set-but-broken PORT stops startup.
        let addr = parse_addr(std::env::var("PORT").ok().as_deref())?;

        let app_env = AppEnv::from_env();

        let jwt_secret_key =
            std::env::var("JWT_SECRET_KEY").map_err(|_| ConfigError::Missing("JWT_SECRET_KEY"))?;

        let users = parse_users(&std::env::var("AUTH_USERS").unwrap_or_default())?;

        Ok(Self {
            addr,
            app_env,
            jwt_secret_key,
            users,
        })
    }
}

/// Bind address for `PORT`: `0.0.0.0:<port>`, 8080 when unset.
pub fn parse_addr(port: Option<&str>) -> Result<SocketAddr, ConfigError> {
    let port = match port {
        None => DEFAULT_PORT,
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid("PORT"))?,
    };

    Ok(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
}

/// Parse `AUTH_USERS`: comma-separated `username:sha256hex:ROLE`.
pub fn parse_users(raw: &str) -> Result<Vec<UserEntry>, ConfigError> {
    const KEY: &str = "AUTH_USERS";

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let mut parts = entry.splitn(3, ':');
            let (Some(username), Some(digest), Some(role)) =
                (parts.next(), parts.next(), parts.next())
            else {
                return Err(ConfigError::Invalid(KEY));
            };

            let username = username.trim();
            let digest = digest.trim();
            if username.is_empty()
                || digest.len() != 64
                || !digest.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return Err(ConfigError::Invalid(KEY));
            }

            let role = Role::from_str(role.trim()).map_err(|_| ConfigError::Invalid(KEY))?;

            Ok(UserEntry {
                username: username.to_string(),
                password_sha256: digest.to_ascii_lowercase(),
                role,
            })
        })
        .collect()
}
