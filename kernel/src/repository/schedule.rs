use crate::model::{
    id::ScheduleId,
    list::{PaginatedList, PaginationRequest},
    schedule::{
        event::{CreateSchedule, DecideSchedule, DeleteSchedule, UpdateSchedule},
        Schedule, ScheduleScope,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    // Stores a new pending schedule without approver.
    async fn create(&self, event: CreateSchedule) -> AppResult<ScheduleId>;
    async fn find_by_id(&self, schedule_id: ScheduleId) -> AppResult<Option<Schedule>>;
    async fn find_all(
        &self,
        scope: ScheduleScope,
        pagination: PaginationRequest,
    ) -> AppResult<PaginatedList<Schedule>>;
    // Only touches the time window, description and location of a pending schedule.
    async fn update(&self, event: UpdateSchedule) -> AppResult<()>;
    // Writes status and approver together.
    async fn update_status(&self, event: DecideSchedule) -> AppResult<()>;
    async fn delete(&self, event: DeleteSchedule) -> AppResult<()>;
}
