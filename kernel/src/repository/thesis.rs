use crate::model::{
    id::{LecturerId, StudentId, ThesisId},
    list::{PaginatedList, PaginationRequest},
    thesis::{event::UpdateThesis, Thesis, ThesisExpand},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ThesisRepository: Send + Sync {
    async fn find_by_id(&self, thesis_id: ThesisId, expand: ThesisExpand)
        -> AppResult<Option<Thesis>>;
    // Every thesis owned by the student; callers decide what "more than one" means.
    async fn find_by_student(&self, student_id: StudentId) -> AppResult<Vec<Thesis>>;
    async fn find_all_by_lecturer(
        &self,
        lecturer_id: LecturerId,
        pagination: PaginationRequest,
    ) -> AppResult<PaginatedList<Thesis>>;
    async fn update(&self, event: UpdateThesis) -> AppResult<()>;
}
