use super::{thesis::ThesisRow, user::identity_from_columns};
use chrono::{DateTime, Utc};
use kernel::model::{
    id::{ScheduleId, UserId},
    schedule::{Decision, Schedule, ScheduleStatus, Verdict},
    thesis::Supervisor,
};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct ScheduleRow {
    pub schedule_id: ScheduleId,
    pub proposed_at: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub schedule_description: String,
    pub schedule_location: String,
    #[sqlx(flatten)]
    pub thesis: ThesisRow,
    pub created_by_id: UserId,
    pub created_by_identifier: String,
    pub created_by_role: String,
    pub created_by_name: Option<String>,
    pub approved_by_id: Option<UserId>,
    pub approved_by_identifier: Option<String>,
    pub approved_by_role: Option<String>,
    pub approved_by_name: Option<String>,
}

impl ScheduleRow {
    pub fn into_schedule(self, supervisors: Vec<Supervisor>) -> AppResult<Schedule> {
        let ScheduleRow {
            schedule_id,
            proposed_at,
            start_time,
            end_time,
            status,
            schedule_description,
            schedule_location,
            thesis,
            created_by_id,
            created_by_identifier,
            created_by_role,
            created_by_name,
            approved_by_id,
            approved_by_identifier,
            approved_by_role,
            approved_by_name,
        } = self;

        let status = ScheduleStatus::from_str(&status).map_err(|_| {
            AppError::ConversionEntityError(format!("unknown schedule status: {status}"))
        })?;
        let decision = match (status, approved_by_id, approved_by_identifier, approved_by_role) {
            (ScheduleStatus::Pending, None, _, _) => None,
            (decided, Some(user_id), Some(identifier), Some(role)) => Some(Decision {
                verdict: Verdict::try_from(decided).map_err(|_| {
                    AppError::ConversionEntityError(format!(
                        "pending schedule ({schedule_id}) has an approver"
                    ))
                })?,
                decided_by: identity_from_columns(user_id, identifier, &role, approved_by_name)?,
            }),
            _ => {
                return Err(AppError::ConversionEntityError(format!(
                    "decided schedule ({schedule_id}) has no approver"
                )))
            }
        };

        Ok(Schedule {
            schedule_id,
            proposed_at,
            start_time,
            end_time,
            description: schedule_description,
            location: schedule_location,
            thesis: thesis.into_thesis(supervisors)?,
            created_by: identity_from_columns(
                created_by_id,
                created_by_identifier,
                &created_by_role,
                created_by_name,
            )?,
            decision,
        })
    }
}
