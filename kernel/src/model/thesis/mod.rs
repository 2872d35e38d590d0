use crate::model::{
    id::{LecturerId, StudentId, ThesisId},
    user::Affiliation,
};
use strum::{AsRefStr, EnumIter, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Progress {
    #[strum(serialize = "bab1")]
    Bab1,
    #[strum(serialize = "bab2")]
    Bab2,
    #[strum(serialize = "bab3")]
    Bab3,
    #[strum(serialize = "bab4")]
    Bab4,
    #[strum(serialize = "bab5")]
    Bab5,
    SeminarProposal,
    SeminarHasil,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thesis {
    pub thesis_id: ThesisId,
    pub title: String,
    pub description: String,
    pub progress: Progress,
    pub student: ThesisStudent,
    pub supervisors: Vec<Supervisor>,
}

impl Thesis {
    pub fn is_supervised_by(&self, lecturer_id: LecturerId) -> bool {
        self.supervisors
            .iter()
            .any(|s| s.lecturer_id == lecturer_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThesisStudent {
    pub student_id: StudentId,
    pub name: String,
    pub nim: String,
    pub affiliation: Option<Affiliation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supervisor {
    pub lecturer_id: LecturerId,
    pub name: String,
    pub nip: String,
    pub affiliation: Option<Affiliation>,
}

/// What a thesis query loads beyond the aggregate itself.
///
/// Supervisors and the owning student's identity are part of every thesis
/// read. Study program and faculty are only joined when `affiliation` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThesisExpand {
    pub affiliation: bool,
}

impl ThesisExpand {
    pub const IDENTITY: Self = Self { affiliation: false };
    pub const FULL: Self = Self { affiliation: true };
}
