use crate::model::{
    id::{LecturerId, StudentId, UserId},
    role::{Identifier, Role},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub identifier: Identifier,
    pub role: Role,
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    Student { student_id: StudentId, name: String },
    Lecturer { lecturer_id: LecturerId, name: String },
}

impl User {
    pub fn student_id(&self) -> Option<StudentId> {
        match &self.profile {
            Some(Profile::Student { student_id, .. }) => Some(*student_id),
            _ => None,
        }
    }

    pub fn lecturer_id(&self) -> Option<LecturerId> {
        match &self.profile {
            Some(Profile::Lecturer { lecturer_id, .. }) => Some(*lecturer_id),
            _ => None,
        }
    }

    /// Name shown to other users; falls back to the identifier when no
    /// profile is linked.
    pub fn display_name(&self) -> &str {
        match &self.profile {
            Some(Profile::Student { name, .. }) | Some(Profile::Lecturer { name, .. }) => name,
            None => self.identifier.as_str(),
        }
    }

    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            user_id: self.user_id,
            name: self.display_name().to_string(),
            identifier: self.identifier.clone(),
            role: self.role,
        }
    }
}

/// A user as referenced from another aggregate, e.g. the creator of a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: UserId,
    pub name: String,
    pub identifier: Identifier,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affiliation {
    pub study_program: String,
    pub faculty: String,
}
