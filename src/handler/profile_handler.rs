use crate::dto::user_dto::UserReadDto;
use crate::entity::user::User;
use axum::{Extension, Json};

pub async fn profile(Extension(current_user): Extension<User>) -> Json<UserReadDto> {
    Json(UserReadDto::from(current_user))
}
