use crate::config::database::Database;
use crate::repository::user_repository;
use crate::repository::user_repository::UserRepositoryTrait;
use crate::service::auth_service::{AuthService, Authenticator};
use crate::service::token_service::TokenService;
use crate::service::user_service::UserService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub(crate) token_service: TokenService,
    pub(crate) user_service: UserService,
    pub(crate) user_repo: user_repository::UserRepository,
    pub(crate) authenticator: Arc<dyn Authenticator>,
}

impl AuthState {
    pub fn new_with_token_service(db_conn: &Arc<Database>, token_service: TokenService) -> AuthState {
        Self {
            token_service,
            user_service: UserService::new(db_conn),
            user_repo: user_repository::UserRepository::new(db_conn),
            authenticator: Arc::new(AuthService::new(db_conn)),
        }
    }
}
