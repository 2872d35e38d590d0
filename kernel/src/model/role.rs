use strum::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Student,
    Lecturer,
    PrimaryLecturer,
    SecondaryLecturer,
}

impl Role {
    pub fn is_student(self) -> bool {
        matches!(self, Role::Student)
    }

    pub fn is_lecturer(self) -> bool {
        match self {
            Role::Student => false,
            Role::Lecturer | Role::PrimaryLecturer | Role::SecondaryLecturer => true,
        }
    }
}

/// Number that identifies a user inside the university, tagged by the kind
/// of user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// Student number.
    Nim(String),
    /// Lecturer staff number.
    Nip(String),
}

impl Identifier {
    pub fn for_role(role: Role, raw: String) -> Self {
        if role.is_lecturer() {
            Identifier::Nip(raw)
        } else {
            Identifier::Nim(raw)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Identifier::Nim(v) | Identifier::Nip(v) => v,
        }
    }
}
