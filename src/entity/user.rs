use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted identity record. `username` and `email` are enforced unique by
/// the database; `password` holds a bcrypt hash, never plaintext. `version`
/// is the optimistic-concurrency counter bumped on every update.
#[derive(Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub roles: Vec<String>,
    pub enabled: bool,
    pub account_non_locked: bool,
    pub credentials_non_expired: bool,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub refresh_token_hash: Option<String>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("roles", &self.roles)
            .field("enabled", &self.enabled)
            .field("account_non_locked", &self.account_non_locked)
            .field("version", &self.version)
            .finish()
    }
}
