use crate::config::database::{Database, DatabaseTrait};
use crate::entity::user::User;
use crate::error::AppError;
use crate::error::user_error::UserError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, password, roles, enabled, account_non_locked, \
     credentials_non_expired, version, created_at, updated_at, refresh_token_hash, \
     refresh_token_expires_at";

#[derive(Clone)]
pub struct UserRepository {
    db_conn: Arc<Database>,
}

#[async_trait]
pub trait UserRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn insert(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn store_refresh_token(
        &self,
        user_id: Uuid,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
        expected_version: i64,
    ) -> Result<(), AppError>;
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    /// Insert a new user. Duplicate usernames or emails are caught at the
    /// unique indexes, not by a read-then-write check, so concurrent
    /// registrations cannot both succeed.
    async fn insert(&self, user: &User) -> Result<User, AppError> {
        let query = format!(
            "INSERT INTO users (id, username, email, password, roles, enabled, \
             account_non_locked, credentials_non_expired, version, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.roles)
            .bind(user.enabled)
            .bind(user.account_non_locked)
            .bind(user.credentials_non_expired)
            .bind(user.version)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(self.db_conn.get_pool())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    warn!("Rejected duplicate registration for username: {}", user.username);
                    AppError::User(UserError::DuplicateIdentity)
                } else {
                    AppError::Database(e)
                }
            })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(self.db_conn.get_pool())
            .await
            .map_err(AppError::Database)
    }

    /// Overwrite the stored refresh-token hash and expiry, guarded by the
    /// optimistic version counter. Zero rows affected means another writer
    /// got there first.
    async fn store_refresh_token(
        &self,
        user_id: Uuid,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
        expected_version: i64,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET refresh_token_hash = $1, refresh_token_expires_at = $2, \
             updated_at = NOW(), version = version + 1 \
             WHERE id = $3 AND version = $4",
        )
        .bind(refresh_token_hash)
        .bind(expires_at)
        .bind(user_id)
        .bind(expected_version)
        .execute(self.db_conn.get_pool())
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            warn!("Stale refresh-token write for user ID: {}", user_id);
            return Err(AppError::User(UserError::VersionConflict));
        }

        Ok(())
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some("23505"),
        _ => false,
    }
}
