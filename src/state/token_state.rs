use crate::config::database::Database;
use crate::repository::user_repository::{UserRepository, UserRepositoryTrait};
use crate::service::token_service::TokenService;
use std::sync::Arc;

#[derive(Clone)]
pub struct TokenState {
    pub token_service: TokenService,
    pub user_repo: UserRepository,
}

impl TokenState {
    pub fn new_with_token_service(db_conn: &Arc<Database>, token_service: TokenService) -> Self {
        Self {
            token_service,
            user_repo: UserRepository::new(db_conn),
        }
    }
}
