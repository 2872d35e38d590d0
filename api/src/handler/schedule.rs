use crate::{
    extractor::AuthorizedUser,
    model::{
        list::ListQuery,
        schedule::{
            ApprovalRequest, ApprovalRequestWithId, CreateScheduleRequest,
            PaginatedScheduleResponse, ScheduleResponse, UpdateScheduleRequest,
            UpdateScheduleRequestWithId,
        },
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::ScheduleId;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn create_schedule(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateScheduleRequest>,
) -> AppResult<(StatusCode, Json<ScheduleResponse>)> {
    req.validate(&())?;

    registry
        .schedule_workflow()
        .create(&user.user, req.into())
        .await
        .map(|schedule| (StatusCode::CREATED, Json(schedule.into())))
}

pub async fn show_schedule_list(
    user: AuthorizedUser,
    Query(query): Query<ListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedScheduleResponse>> {
    query.validate(&())?;

    registry
        .schedule_workflow()
        .get_all(&user.user, query.into())
        .await
        .map(PaginatedScheduleResponse::from)
        .map(Json)
}

pub async fn show_schedule(
    user: AuthorizedUser,
    Path(schedule_id): Path<ScheduleId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ScheduleResponse>> {
    registry
        .schedule_workflow()
        .get_detail(&user.user, schedule_id)
        .await
        .map(ScheduleResponse::from)
        .map(Json)
}

pub async fn update_schedule(
    user: AuthorizedUser,
    Path(schedule_id): Path<ScheduleId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateScheduleRequest>,
) -> AppResult<Json<ScheduleResponse>> {
    req.validate(&())?;

    let update_schedule = UpdateScheduleRequestWithId::new(schedule_id, req);
    registry
        .schedule_workflow()
        .update(&user.user, update_schedule.into())
        .await
        .map(ScheduleResponse::from)
        .map(Json)
}

pub async fn approve_schedule(
    user: AuthorizedUser,
    Path(schedule_id): Path<ScheduleId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<ApprovalRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let review = ApprovalRequestWithId::new(schedule_id, req);
    registry
        .schedule_workflow()
        .approve(&user.user, review.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_schedule(
    user: AuthorizedUser,
    Path(schedule_id): Path<ScheduleId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .schedule_workflow()
        .delete(&user.user, schedule_id)
        .await
        .map(|_| StatusCode::OK)
}
