use crate::model::{id::ThesisId, thesis::Progress};

#[derive(Debug)]
pub struct UpdateThesis {
    pub thesis_id: ThesisId,
    pub title: String,
    pub description: String,
    pub progress: Progress,
}
