use crate::{
    model::{auth::AccessToken, user::User},
    repository::{auth::AuthRepository, user::UserRepository},
};
use derive_new::new;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

#[derive(new)]
pub struct IdentityResolver {
    auth_repository: Arc<dyn AuthRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl IdentityResolver {
    pub async fn resolve_caller(&self, access_token: &AccessToken) -> AppResult<User> {
        let user_id = self
            .auth_repository
            .fetch_user_id_from_token(access_token)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(%user_id, "token resolved to a missing user");
                AppError::EntityNotFound(format!("user ({user_id}) was not found"))
            })
    }
}
