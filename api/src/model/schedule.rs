use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::{
    model::{
        id::ScheduleId,
        schedule::{event::UpdateSchedule, Schedule},
    },
    workflow::schedule::{ProposeSchedule, ReviewSchedule},
};
use serde::{Deserialize, Serialize};

use super::{list::ListResponse, thesis::ThesisResponse, user::UserIdentityResponse};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateScheduleRequest {
    #[garde(skip)]
    pub proposed_at: DateTime<Utc>,
    #[garde(skip)]
    pub start_time: DateTime<Utc>,
    #[garde(skip)]
    pub end_time: DateTime<Utc>,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(length(min = 1))]
    pub location: String,
}

impl From<CreateScheduleRequest> for ProposeSchedule {
    fn from(value: CreateScheduleRequest) -> Self {
        let CreateScheduleRequest {
            proposed_at,
            start_time,
            end_time,
            description,
            location,
        } = value;
        ProposeSchedule::new(proposed_at, start_time, end_time, description, location)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateScheduleRequest {
    #[garde(skip)]
    pub proposed_at: DateTime<Utc>,
    #[garde(skip)]
    pub start_time: DateTime<Utc>,
    #[garde(skip)]
    pub end_time: DateTime<Utc>,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(length(min = 1))]
    pub location: String,
}

#[derive(new)]
pub struct UpdateScheduleRequestWithId(ScheduleId, UpdateScheduleRequest);

impl From<UpdateScheduleRequestWithId> for UpdateSchedule {
    fn from(value: UpdateScheduleRequestWithId) -> Self {
        let UpdateScheduleRequestWithId(
            schedule_id,
            UpdateScheduleRequest {
                proposed_at,
                start_time,
                end_time,
                description,
                location,
            },
        ) = value;
        UpdateSchedule::new(
            schedule_id,
            proposed_at,
            start_time,
            end_time,
            description,
            location,
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApprovalRequest {
    #[garde(length(min = 1))]
    pub status: String,
}

#[derive(new)]
pub struct ApprovalRequestWithId(ScheduleId, ApprovalRequest);

impl From<ApprovalRequestWithId> for ReviewSchedule {
    fn from(value: ApprovalRequestWithId) -> Self {
        let ApprovalRequestWithId(schedule_id, ApprovalRequest { status }) = value;
        ReviewSchedule::new(schedule_id, status)
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub id: ScheduleId,
    pub proposed_at: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: String,
    pub location: String,
    pub status: String,
    pub thesis: ThesisResponse,
    pub created_by: UserIdentityResponse,
    pub approved_by: Option<UserIdentityResponse>,
}

impl From<Schedule> for ScheduleResponse {
    fn from(value: Schedule) -> Self {
        let status = value.status().as_ref().to_string();
        let Schedule {
            schedule_id,
            proposed_at,
            start_time,
            end_time,
            description,
            location,
            thesis,
            created_by,
            decision,
        } = value;
        Self {
            id: schedule_id,
            proposed_at,
            start_time,
            end_time,
            description,
            location,
            status,
            thesis: thesis.into(),
            created_by: created_by.into(),
            approved_by: decision.map(|d| d.decided_by.into()),
        }
    }
}

pub type PaginatedScheduleResponse = ListResponse<ScheduleResponse>;
