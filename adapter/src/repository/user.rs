use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{id::UserId, user::User},
    repository::user::UserRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::user::UserRow, ConnectionPool};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT
                    u.user_id,
                    u.identifier,
                    u.role,
                    s.student_id,
                    s.name AS student_name,
                    l.lecturer_id,
                    l.name AS lecturer_name
                FROM users AS u
                LEFT JOIN students AS s ON s.student_id = u.student_id
                LEFT JOIN lecturers AS l ON l.lecturer_id = u.lecturer_id
                WHERE u.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }
}
