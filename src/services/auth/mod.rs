pub mod claims;
pub mod clock;
pub mod error;
pub mod factory;
pub mod token_service;

pub use claims::{Role, TokenClaims};
pub use error::{TokenIssueError, TokenKeyError, TokenRejection};
pub use factory::build_token_service;
pub use token_service::{BEARER_PREFIX, DEFAULT_TOKEN_TTL_SECONDS, TokenConfig, TokenService};
