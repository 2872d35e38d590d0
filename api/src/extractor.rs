use axum::{async_trait, extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{auth::AccessToken, user::User};
use registry::AppRegistry;
use shared::error::AppError;

/// The caller behind the bearer token of the current request.
pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub user: User,
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthenticatedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        let user = registry
            .identity_resolver()
            .resolve_caller(&access_token)
            .await?;

        Ok(Self { access_token, user })
    }
}
