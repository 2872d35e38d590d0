use crate::model::{
    id::{ScheduleId, ThesisId, UserId},
    schedule::Verdict,
};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(new, Debug)]
pub struct CreateSchedule {
    pub thesis_id: ThesisId,
    pub created_by: UserId,
    pub proposed_at: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: String,
    pub location: String,
}

#[derive(new, Debug)]
pub struct UpdateSchedule {
    pub schedule_id: ScheduleId,
    pub proposed_at: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: String,
    pub location: String,
}

#[derive(new, Debug)]
pub struct DecideSchedule {
    pub schedule_id: ScheduleId,
    pub verdict: Verdict,
    pub decided_by: UserId,
    pub allow_redecision: bool,
}

#[derive(new, Debug)]
pub struct DeleteSchedule {
    pub schedule_id: ScheduleId,
}
