use crate::config::database::Database;
use crate::config::parameter;
use crate::dto::auth_dto::AuthRequestDto;
use crate::dto::user_dto::UserReadDto;
use crate::entity::user::User;
use crate::error::AppError;
use crate::repository::user_repository::{UserRepository, UserRepositoryTrait};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

const DEFAULT_ROLE: &str = "USER";

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            user_repo: UserRepository::new(db_conn),
            bcrypt_cost: parameter::get_u64("BCRYPT_COST") as u32,
        }
    }

    /// Persist a new user with a hashed password and default roles/flags.
    /// Uniqueness is enforced by the storage layer, which surfaces duplicates
    /// as `DuplicateIdentity`.
    pub async fn create_user(&self, payload: AuthRequestDto) -> Result<UserReadDto, AppError> {
        let hashed_password = hash_password(&payload.password, self.bcrypt_cost)?;
        let now = Utc::now();

        let user = User {
            id: Uuid::now_v7(),
            username: payload.username,
            email: payload.email,
            password: hashed_password,
            roles: vec![DEFAULT_ROLE.to_string()],
            enabled: true,
            account_non_locked: true,
            credentials_non_expired: true,
            version: 0,
            created_at: now,
            updated_at: now,
            refresh_token_hash: None,
            refresh_token_expires_at: None,
        };

        let stored = self.user_repo.insert(&user).await?;
        Ok(UserReadDto::from(stored))
    }

    /// Record the hash and expiry of a freshly issued refresh token on the
    /// user row, guarded by the caller's view of the version counter.
    pub async fn attach_refresh_token(
        &self,
        user: &User,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.user_repo
            .store_refresh_token(user.id, refresh_token_hash, expires_at, user.version)
            .await
    }
}

pub(crate) fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(password, cost).map_err(|e| {
        error!("Failed to hash password: {}", e);
        AppError::Internal("Password hashing failed".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_round_trip() {
        // Minimum cost keeps the test fast
        let hash = hash_password("secret1", 4).unwrap();

        assert_ne!(hash, "secret1");
        assert!(bcrypt::verify("secret1", &hash).unwrap());
        assert!(!bcrypt::verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("secret1", 4).unwrap();
        let second = hash_password("secret1", 4).unwrap();

        assert_ne!(first, second);
    }
}
