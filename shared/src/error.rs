use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    InvalidInput(String),
    #[error("failed to run the transaction")]
    TransactionError(#[source] sqlx::Error),
    #[error("an error occurred while querying the database")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("authentication is required")]
    UnauthenticatedError,
    #[error("{0}")]
    ForbiddenOperation(String),
    #[error("{0}")]
    ConversionEntityError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::ConvertToUuidError(_) => StatusCode::BAD_REQUEST,
            AppError::UnauthenticatedError => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenOperation(_) => StatusCode::FORBIDDEN,
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::ConversionEntityError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();

        // Storage failures are logged with their cause chain and never echoed back.
        let message = if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
            "internal server error".to_string()
        } else {
            tracing::warn!(error.message = %self, status = %status_code, "request failed");
            self.to_string()
        };

        (status_code, Json(ErrorBody { message })).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::EntityNotFound("schedule".into()), StatusCode::NOT_FOUND)]
    #[case(AppError::InvalidInput("status".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::UnauthenticatedError, StatusCode::UNAUTHORIZED)]
    #[case(AppError::ForbiddenOperation("access denied".into()), StatusCode::FORBIDDEN)]
    #[case(AppError::UnprocessableEntity("decided".into()), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(AppError::NoRowsAffectedError("none".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(
        AppError::SpecificOperationError(sqlx::Error::RowNotFound),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn maps_taxonomy_to_status(#[case] err: AppError, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
        assert_eq!(err.into_response().status(), expected);
    }
}
