use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Credential record keyed by email (store enforces the uniqueness).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 digest, never exposed in JSON
    pub created_at: OffsetDateTime,
    pub last_login: Option<OffsetDateTime>,
}

/// Short-lived (email, code, expiry) record enabling one password reset.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResetRequest {
    pub email: String,
    pub code: String,
    pub expires_at: OffsetDateTime,
}
