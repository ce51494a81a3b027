use crate::config::database::Database;
use crate::config::parameter;
use crate::entity::user::User;
use crate::error::AppError;
use crate::error::auth_error::AuthError;
use crate::repository::user_repository::{UserRepository, UserRepositoryTrait};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Authenticated identity plus its granted roles.
#[derive(Clone, Debug)]
pub struct Principal {
    pub username: String,
    pub roles: Vec<String>,
}

/// The single capability the auth endpoint needs: check a username/password
/// pair and hand back the principal it belongs to.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn verify_credentials(&self, username: &str, password: &str) -> Result<Principal, AppError>;
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    // Verified against when the username does not exist, so unknown and
    // known usernames cost the same bcrypt work.
    dummy_hash: String,
}

impl AuthService {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        let bcrypt_cost = parameter::get_u64("BCRYPT_COST") as u32;
        let dummy_hash = bcrypt::hash("placeholder-password", bcrypt_cost).unwrap_or_default();

        Self {
            user_repo: UserRepository::new(db_conn),
            dummy_hash,
        }
    }
}

#[async_trait]
impl Authenticator for AuthService {
    async fn verify_credentials(&self, username: &str, password: &str) -> Result<Principal, AppError> {
        let user = match self.user_repo.find_by_username(username).await? {
            Some(user) => user,
            None => {
                let _ = bcrypt::verify(password, &self.dummy_hash);
                warn!("Login failed, unknown username");
                return Err(AuthError::InvalidCredentials)?;
            }
        };

        let password_matches = bcrypt::verify(password, &user.password).unwrap_or(false);
        if !password_matches {
            warn!("Login failed, password mismatch for user ID: {}", user.id);
            return Err(AuthError::InvalidCredentials)?;
        }

        check_account_flags(&user)?;

        info!("Authentication successful for user ID: {}", user.id);
        Ok(Principal {
            username: user.username,
            roles: user.roles,
        })
    }
}

/// Account policy flags, checked only after a successful password match so
/// the outcome cannot be used to probe for usernames.
fn check_account_flags(user: &User) -> Result<(), AuthError> {
    if !user.account_non_locked {
        warn!("Login rejected, account locked for user ID: {}", user.id);
        return Err(AuthError::AccountLocked);
    }
    if !user.enabled {
        warn!("Login rejected, account disabled for user ID: {}", user.id);
        return Err(AuthError::AccountDisabled);
    }
    Ok(())
}
