use kernel::model::{
    id::{LecturerId, StudentId, UserId},
    role::{Identifier, Role},
    user::{Profile, User, UserIdentity},
};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub identifier: String,
    pub role: String,
    pub student_id: Option<StudentId>,
    pub student_name: Option<String>,
    pub lecturer_id: Option<LecturerId>,
    pub lecturer_name: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            identifier,
            role,
            student_id,
            student_name,
            lecturer_id,
            lecturer_name,
        } = value;
        let role = parse_role(&role)?;
        // The profile that counts is the one matching the role.
        let profile = if role.is_student() {
            student_id
                .zip(student_name)
                .map(|(student_id, name)| Profile::Student { student_id, name })
        } else {
            lecturer_id
                .zip(lecturer_name)
                .map(|(lecturer_id, name)| Profile::Lecturer { lecturer_id, name })
        };
        Ok(User {
            user_id,
            identifier: Identifier::for_role(role, identifier),
            role,
            profile,
        })
    }
}

pub(crate) fn parse_role(raw: &str) -> AppResult<Role> {
    Role::from_str(raw).map_err(|_| AppError::ConversionEntityError(format!("unknown role: {raw}")))
}

// Users referenced by other rows only carry their identity columns.
pub(crate) fn identity_from_columns(
    user_id: UserId,
    identifier: String,
    role: &str,
    name: Option<String>,
) -> AppResult<UserIdentity> {
    let role = parse_role(role)?;
    Ok(UserIdentity {
        user_id,
        name: name.unwrap_or_else(|| identifier.clone()),
        identifier: Identifier::for_role(role, identifier),
        role,
    })
}
