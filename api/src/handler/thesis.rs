use crate::{
    extractor::AuthorizedUser,
    model::{
        list::ListQuery,
        thesis::{
            PaginatedThesisResponse, ThesisResponse, UpdateThesisRequest,
            UpdateThesisRequestWithId,
        },
    },
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use garde::Validate;
use kernel::model::id::{LecturerId, ThesisId};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_thesis(
    _user: AuthorizedUser,
    Path(thesis_id): Path<ThesisId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ThesisResponse>> {
    registry
        .thesis_workflow()
        .get_detail(thesis_id)
        .await
        .map(ThesisResponse::from)
        .map(Json)
}

pub async fn update_thesis(
    user: AuthorizedUser,
    Path(thesis_id): Path<ThesisId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateThesisRequest>,
) -> AppResult<Json<ThesisResponse>> {
    req.validate(&())?;

    let revise = UpdateThesisRequestWithId::new(thesis_id, req);
    registry
        .thesis_workflow()
        .update(&user.user, revise.into())
        .await
        .map(ThesisResponse::from)
        .map(Json)
}

pub async fn show_theses_by_lecturer(
    user: AuthorizedUser,
    Path(lecturer_id): Path<LecturerId>,
    Query(query): Query<ListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedThesisResponse>> {
    query.validate(&())?;

    registry
        .thesis_workflow()
        .get_all_by_lecturer(&user.user, lecturer_id, query.into())
        .await
        .map(PaginatedThesisResponse::from)
        .map(Json)
}
