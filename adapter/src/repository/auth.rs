use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{auth::AccessToken, id::UserId},
    repository::auth::AuthRepository,
};
use shared::error::{AppError, AppResult};
use std::{str::FromStr, sync::Arc};

use crate::redis::{
    model::{RedisKey, RedisValue},
    RedisClient,
};

#[derive(new)]
pub struct AuthRepositoryImpl {
    kv: Arc<RedisClient>,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let key: AuthorizationKey = access_token.into();
        self.kv
            .get(&key)
            .await
            .map(|value| value.map(AuthorizedUserId::into_inner))
    }
}

/// The raw bearer token is the key under which the issuer stores the user id.
pub struct AuthorizationKey(String);

pub struct AuthorizedUserId(UserId);

impl AuthorizedUserId {
    pub fn into_inner(self) -> UserId {
        self.0
    }
}

impl From<&AccessToken> for AuthorizationKey {
    fn from(token: &AccessToken) -> Self {
        Self(token.0.clone())
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        self.0.clone()
    }
}

impl RedisValue for AuthorizedUserId {
    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<String> for AuthorizedUserId {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        UserId::from_str(&s).map(Self).map_err(|_| {
            AppError::ConversionEntityError(format!("stored session value is not a user id: {s}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_the_raw_token() {
        let key = AuthorizationKey::from(&AccessToken("f3a9c1".into()));
        assert_eq!(key.inner(), "f3a9c1");
    }

    #[test]
    fn stored_value_parses_back_to_user_id() {
        let user_id = UserId::new();
        let value = AuthorizedUserId::try_from(user_id.to_string()).unwrap();
        assert_eq!(value.inner(), user_id.to_string());
        assert_eq!(value.into_inner(), user_id);
    }

    #[test]
    fn corrupt_stored_value_is_a_server_error() {
        let Err(err) = AuthorizedUserId::try_from("not-a-uuid".to_string()) else {
            panic!("a non-uuid value must not parse");
        };
        assert!(matches!(err, AppError::ConversionEntityError(_)));
        assert_eq!(err.status_code().as_u16(), 500);
    }
}
