use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::auth::Role;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
