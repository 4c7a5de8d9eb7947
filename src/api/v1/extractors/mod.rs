mod auth_ctx;
mod validated_json;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use validated_json::{Validate, ValidatedJson};
