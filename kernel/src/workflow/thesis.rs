use crate::{
    model::{
        id::{LecturerId, ThesisId},
        list::{PaginatedList, PaginationRequest},
        thesis::{event::UpdateThesis, Progress, Thesis, ThesisExpand},
        user::User,
    },
    repository::thesis::ThesisRepository,
};
use derive_new::new;
use shared::error::{AppError, AppResult};
use std::{str::FromStr, sync::Arc};

#[derive(new, Debug)]
pub struct ReviseThesis {
    pub thesis_id: ThesisId,
    pub title: String,
    pub description: String,
    pub progress: String,
}

#[derive(new)]
pub struct ThesisWorkflow {
    thesis_repository: Arc<dyn ThesisRepository>,
}

impl ThesisWorkflow {
    #[tracing::instrument(skip(self))]
    pub async fn get_detail(&self, thesis_id: ThesisId) -> AppResult<Thesis> {
        self.thesis_repository
            .find_by_id(thesis_id, ThesisExpand::FULL)
            .await?
            .ok_or_else(|| {
                tracing::warn!("thesis not found");
                AppError::EntityNotFound(format!("thesis ({thesis_id}) was not found"))
            })
    }

    #[tracing::instrument(skip_all, fields(user_id = %caller.user_id, thesis_id = %request.thesis_id))]
    pub async fn update(&self, caller: &User, request: ReviseThesis) -> AppResult<Thesis> {
        if caller.role.is_lecturer() {
            tracing::warn!(role = caller.role.as_ref(), "lecturer cannot update the thesis");
            return Err(AppError::ForbiddenOperation(
                "lecturer cannot update thesis".into(),
            ));
        }

        let mut thesis = self.get_detail(request.thesis_id).await?;
        if caller.student_id() != Some(thesis.student.student_id) {
            tracing::warn!("student does not own the thesis");
            return Err(AppError::ForbiddenOperation(
                "only the owning student can update this thesis".into(),
            ));
        }

        let progress = Progress::from_str(&request.progress).map_err(|_| {
            AppError::InvalidInput(format!("invalid thesis progress: {}", request.progress))
        })?;

        self.thesis_repository
            .update(UpdateThesis {
                thesis_id: thesis.thesis_id,
                title: request.title.clone(),
                description: request.description.clone(),
                progress,
            })
            .await?;

        thesis.title = request.title;
        thesis.description = request.description;
        thesis.progress = progress;

        tracing::info!("thesis updated");
        Ok(thesis)
    }

    #[tracing::instrument(skip(self, caller), fields(user_id = %caller.user_id))]
    pub async fn get_all_by_lecturer(
        &self,
        caller: &User,
        lecturer_id: LecturerId,
        pagination: PaginationRequest,
    ) -> AppResult<PaginatedList<Thesis>> {
        if caller.role.is_student() {
            tracing::warn!("student cannot read all lecturer thesis");
            return Err(AppError::ForbiddenOperation(
                "student cannot read all lecturer thesis".into(),
            ));
        }
        self.thesis_repository
            .find_all_by_lecturer(lecturer_id, pagination)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::testing::Fixture;

    fn revise(thesis_id: ThesisId, progress: &str) -> ReviseThesis {
        ReviseThesis::new(
            thesis_id,
            "Graph Based Scheduling v2".into(),
            "Revised scope".into(),
            progress.into(),
        )
    }

    #[tokio::test]
    async fn detail_loads_affiliations() {
        let fx = Fixture::new();
        let thesis = fx
            .thesis_workflow()
            .get_detail(fx.thesis.thesis_id)
            .await
            .unwrap();
        assert_eq!(thesis.supervisors.len(), 2);
        assert!(thesis.student.affiliation.is_some());
        assert!(thesis.supervisors.iter().all(|s| s.affiliation.is_some()));
    }

    #[tokio::test]
    async fn detail_of_missing_thesis_is_not_found() {
        let fx = Fixture::new();
        let res = fx.thesis_workflow().get_detail(ThesisId::new()).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn owner_updates_thesis() {
        let fx = Fixture::new();
        let wf = fx.thesis_workflow();

        let updated = wf
            .update(&fx.student, revise(fx.thesis.thesis_id, "seminar_proposal"))
            .await
            .unwrap();
        assert_eq!(updated.progress, Progress::SeminarProposal);

        let reloaded = wf.get_detail(fx.thesis.thesis_id).await.unwrap();
        assert_eq!(reloaded.title, "Graph Based Scheduling v2");
        assert_eq!(reloaded.progress, Progress::SeminarProposal);
        assert_eq!(reloaded.supervisors, fx.thesis.supervisors);
    }

    #[tokio::test]
    async fn invalid_progress_is_rejected() {
        let fx = Fixture::new();
        let res = fx
            .thesis_workflow()
            .update(&fx.student, revise(fx.thesis.thesis_id, "bab9"))
            .await;
        assert!(matches!(res, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn lecturers_and_other_students_cannot_update() {
        let fx = Fixture::new();
        let wf = fx.thesis_workflow();
        for caller in [&fx.l1, &fx.other_student] {
            let res = wf.update(caller, revise(fx.thesis.thesis_id, "bab2")).await;
            assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
        }
    }

    #[tokio::test]
    async fn student_cannot_list_by_lecturer() {
        let fx = Fixture::new();
        let wf = fx.thesis_workflow();
        for target in [fx.l1.lecturer_id().unwrap(), LecturerId::new()] {
            let res = wf
                .get_all_by_lecturer(&fx.student, target, PaginationRequest::default())
                .await;
            assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
        }
    }

    #[tokio::test]
    async fn lists_theses_of_a_lecturer() {
        let fx = Fixture::new();
        let wf = fx.thesis_workflow();

        let list = wf
            .get_all_by_lecturer(
                &fx.outsider,
                fx.l2.lecturer_id().unwrap(),
                PaginationRequest::new(0, 0),
            )
            .await
            .unwrap();
        assert_eq!(list.page, 1);
        assert_eq!(list.per_page, 10);
        assert_eq!(list.count, 1);
        assert_eq!(list.max_page, 1);
        assert_eq!(list.items[0].thesis_id, fx.thesis.thesis_id);
    }
}
