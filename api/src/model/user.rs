use kernel::model::{
    id::UserId,
    role::{Identifier, Role},
    user::{Affiliation, UserIdentity},
};
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    Student,
    Lecturer,
    PrimaryLecturer,
    SecondaryLecturer,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Student => Self::Student,
            Role::Lecturer => Self::Lecturer,
            Role::PrimaryLecturer => Self::PrimaryLecturer,
            Role::SecondaryLecturer => Self::SecondaryLecturer,
        }
    }
}

/// Rendered as a single `nim` or `nip` key next to the other user fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierField {
    Nim(String),
    Nip(String),
}

impl From<Identifier> for IdentifierField {
    fn from(value: Identifier) -> Self {
        match value {
            Identifier::Nim(nim) => Self::Nim(nim),
            Identifier::Nip(nip) => Self::Nip(nip),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserIdentityResponse {
    pub id: UserId,
    pub name: String,
    pub role: RoleName,
    #[serde(flatten)]
    pub identifier: IdentifierField,
}

impl From<UserIdentity> for UserIdentityResponse {
    fn from(value: UserIdentity) -> Self {
        let UserIdentity {
            user_id,
            name,
            identifier,
            role,
        } = value;
        Self {
            id: user_id,
            name,
            role: role.into(),
            identifier: identifier.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AffiliationResponse {
    pub study_program: String,
    pub faculty: String,
}

impl From<Affiliation> for AffiliationResponse {
    fn from(value: Affiliation) -> Self {
        let Affiliation {
            study_program,
            faculty,
        } = value;
        Self {
            study_program,
            faculty,
        }
    }
}
