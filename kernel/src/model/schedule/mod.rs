use crate::model::{
    id::{ScheduleId, UserId},
    thesis::Thesis,
    user::UserIdentity,
};
use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};
use std::str::FromStr;
use strum::{AsRefStr, EnumIter, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ScheduleStatus {
    Pending,
    Approved,
    Rejected,
}

/// Outcome of the approval workflow. `pending` is not a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Rejected,
}

impl Verdict {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let status = ScheduleStatus::from_str(raw)
            .map_err(|_| AppError::InvalidInput(format!("invalid status schedule: {raw}")))?;
        Self::try_from(status)
    }
}

impl TryFrom<ScheduleStatus> for Verdict {
    type Error = AppError;

    fn try_from(value: ScheduleStatus) -> Result<Self, Self::Error> {
        match value {
            ScheduleStatus::Approved => Ok(Verdict::Approved),
            ScheduleStatus::Rejected => Ok(Verdict::Rejected),
            ScheduleStatus::Pending => Err(AppError::InvalidInput(
                "a schedule can only be approved or rejected".into(),
            )),
        }
    }
}

impl From<Verdict> for ScheduleStatus {
    fn from(value: Verdict) -> Self {
        match value {
            Verdict::Approved => ScheduleStatus::Approved,
            Verdict::Rejected => ScheduleStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub verdict: Verdict,
    pub decided_by: UserIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub schedule_id: ScheduleId,
    pub proposed_at: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: String,
    pub location: String,
    pub thesis: Thesis,
    pub created_by: UserIdentity,
    // None while pending; the approver only exists together with a verdict.
    pub decision: Option<Decision>,
}

impl Schedule {
    pub fn status(&self) -> ScheduleStatus {
        match &self.decision {
            None => ScheduleStatus::Pending,
            Some(d) => d.verdict.into(),
        }
    }

    pub fn approved_by(&self) -> Option<&UserIdentity> {
        self.decision.as_ref().map(|d| &d.decided_by)
    }

    pub fn is_pending(&self) -> bool {
        self.decision.is_none()
    }
}

/// Which schedules a caller is allowed to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleScope {
    /// Schedules proposed by this user.
    CreatedBy(UserId),
    /// Schedules whose thesis is supervised by the lecturer linked to this user.
    SupervisedBy(UserId),
}

pub fn ensure_time_window(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> AppResult<()> {
    if end_time <= start_time {
        return Err(AppError::InvalidInput(
            "end_time must be later than start_time".into(),
        ));
    }
    Ok(())
}
