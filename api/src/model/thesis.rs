use derive_new::new;
use garde::Validate;
use kernel::{
    model::{
        id::{LecturerId, StudentId, ThesisId},
        thesis::{Supervisor, Thesis, ThesisStudent},
    },
    workflow::thesis::ReviseThesis,
};
use serde::{Deserialize, Serialize};

use super::{list::ListResponse, user::AffiliationResponse};

#[derive(Debug, Serialize)]
pub struct ThesisResponse {
    pub id: ThesisId,
    pub title: String,
    pub description: String,
    pub progress: String,
    pub student: ThesisStudentResponse,
    pub supervisors: Vec<SupervisorResponse>,
}

impl From<Thesis> for ThesisResponse {
    fn from(value: Thesis) -> Self {
        let Thesis {
            thesis_id,
            title,
            description,
            progress,
            student,
            supervisors,
        } = value;
        Self {
            id: thesis_id,
            title,
            description,
            progress: progress.as_ref().to_string(),
            student: student.into(),
            supervisors: supervisors.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ThesisStudentResponse {
    pub id: StudentId,
    pub name: String,
    pub nim: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<AffiliationResponse>,
}

impl From<ThesisStudent> for ThesisStudentResponse {
    fn from(value: ThesisStudent) -> Self {
        let ThesisStudent {
            student_id,
            name,
            nim,
            affiliation,
        } = value;
        Self {
            id: student_id,
            name,
            nim,
            affiliation: affiliation.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SupervisorResponse {
    pub id: LecturerId,
    pub name: String,
    pub nip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<AffiliationResponse>,
}

impl From<Supervisor> for SupervisorResponse {
    fn from(value: Supervisor) -> Self {
        let Supervisor {
            lecturer_id,
            name,
            nip,
            affiliation,
        } = value;
        Self {
            id: lecturer_id,
            name,
            nip,
            affiliation: affiliation.map(Into::into),
        }
    }
}

pub type PaginatedThesisResponse = ListResponse<ThesisResponse>;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateThesisRequest {
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(length(min = 1))]
    pub progress: String,
}

#[derive(new)]
pub struct UpdateThesisRequestWithId(ThesisId, UpdateThesisRequest);

impl From<UpdateThesisRequestWithId> for ReviseThesis {
    fn from(value: UpdateThesisRequestWithId) -> Self {
        let UpdateThesisRequestWithId(
            thesis_id,
            UpdateThesisRequest {
                title,
                description,
                progress,
            },
        ) = value;
        ReviseThesis::new(thesis_id, title, description, progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::{thesis::Progress, user::Affiliation};
    use serde_json::json;

    #[test]
    fn thesis_summary_omits_unloaded_affiliation() {
        let thesis = Thesis {
            thesis_id: ThesisId::new(),
            title: "Graph Based Scheduling".into(),
            description: "".into(),
            progress: Progress::SeminarProposal,
            student: ThesisStudent {
                student_id: StudentId::new(),
                name: "Siti Rahma".into(),
                nim: "5025201001".into(),
                affiliation: None,
            },
            supervisors: vec![Supervisor {
                lecturer_id: LecturerId::new(),
                name: "Dr. Ahmad Fauzi".into(),
                nip: "198001012005011001".into(),
                affiliation: Some(Affiliation {
                    study_program: "Teknik Informatika".into(),
                    faculty: "Fakultas Teknologi Informasi".into(),
                }),
            }],
        };
        let json = serde_json::to_value(ThesisResponse::from(thesis)).unwrap();
        assert_eq!(json["progress"], json!("seminar_proposal"));
        assert!(json["student"].get("affiliation").is_none());
        assert_eq!(
            json["supervisors"][0]["affiliation"]["study_program"],
            json!("Teknik Informatika")
        );
    }

    #[test]
    fn empty_title_is_rejected() {
        let req: UpdateThesisRequest =
            serde_json::from_value(json!({ "title": "", "progress": "bab2" })).unwrap();
        assert!(req.validate(&()).is_err());
    }
}
