use kernel::model::{
    id::{LecturerId, StudentId, ThesisId},
    thesis::{Progress, Supervisor, Thesis, ThesisStudent},
    user::Affiliation,
};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct ThesisRow {
    pub thesis_id: ThesisId,
    pub title: String,
    pub description: String,
    pub progress: String,
    pub student_id: StudentId,
    pub student_name: String,
    pub student_nim: String,
    pub student_study_program: Option<String>,
    pub student_faculty: Option<String>,
}

impl ThesisRow {
    pub fn into_thesis(self, supervisors: Vec<Supervisor>) -> AppResult<Thesis> {
        let ThesisRow {
            thesis_id,
            title,
            description,
            progress,
            student_id,
            student_name,
            student_nim,
            student_study_program,
            student_faculty,
        } = self;
        let progress = Progress::from_str(&progress).map_err(|_| {
            AppError::ConversionEntityError(format!("unknown thesis progress: {progress}"))
        })?;
        Ok(Thesis {
            thesis_id,
            title,
            description,
            progress,
            student: ThesisStudent {
                student_id,
                name: student_name,
                nim: student_nim,
                affiliation: affiliation(student_study_program, student_faculty),
            },
            supervisors,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct SupervisorRow {
    pub thesis_id: ThesisId,
    pub lecturer_id: LecturerId,
    pub name: String,
    pub nip: String,
    pub study_program: Option<String>,
    pub faculty: Option<String>,
}

impl From<SupervisorRow> for Supervisor {
    fn from(value: SupervisorRow) -> Self {
        let SupervisorRow {
            thesis_id: _,
            lecturer_id,
            name,
            nip,
            study_program,
            faculty,
        } = value;
        Supervisor {
            lecturer_id,
            name,
            nip,
            affiliation: affiliation(study_program, faculty),
        }
    }
}

// Both halves come from the same join; a lecturer or student without a
// study program has no affiliation at all.
fn affiliation(study_program: Option<String>, faculty: Option<String>) -> Option<Affiliation> {
    study_program
        .zip(faculty)
        .map(|(study_program, faculty)| Affiliation {
            study_program,
            faculty,
        })
}
