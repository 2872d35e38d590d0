use crate::{
    model::{
        id::{ScheduleId, StudentId},
        list::{PaginatedList, PaginationRequest},
        role::Role,
        schedule::{
            ensure_time_window,
            event::{CreateSchedule, DecideSchedule, DeleteSchedule, UpdateSchedule},
            Schedule, ScheduleScope, Verdict,
        },
        thesis::{Thesis, ThesisExpand},
        user::User,
    },
    repository::{schedule::ScheduleRepository, thesis::ThesisRepository},
};
use chrono::{DateTime, Utc};
use derive_new::new;
use shared::{
    config::WorkflowConfig,
    error::{AppError, AppResult},
};
use std::sync::Arc;

/// A student's proposal for a supervision session on their own thesis.
#[derive(new, Debug)]
pub struct ProposeSchedule {
    pub proposed_at: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: String,
    pub location: String,
}

#[derive(new, Debug)]
pub struct ReviewSchedule {
    pub schedule_id: ScheduleId,
    // Kept raw so that unknown values surface as validation errors.
    pub status: String,
}

#[derive(new)]
pub struct ScheduleWorkflow {
    schedule_repository: Arc<dyn ScheduleRepository>,
    thesis_repository: Arc<dyn ThesisRepository>,
    config: WorkflowConfig,
}

impl ScheduleWorkflow {
    #[tracing::instrument(skip_all, fields(user_id = %caller.user_id))]
    pub async fn create(&self, caller: &User, request: ProposeSchedule) -> AppResult<Schedule> {
        if !caller.role.is_student() {
            tracing::warn!(role = caller.role.as_ref(), "only students can propose schedules");
            return Err(AppError::ForbiddenOperation(
                "only students can propose schedules".into(),
            ));
        }
        let student_id = caller.student_id().ok_or_else(|| {
            AppError::EntityNotFound(format!("student profile of user ({}) was not found", caller.user_id))
        })?;
        ensure_time_window(request.start_time, request.end_time)?;

        let thesis = self.active_thesis(student_id).await?;

        let ProposeSchedule {
            proposed_at,
            start_time,
            end_time,
            description,
            location,
        } = request;
        let schedule_id = self
            .schedule_repository
            .create(CreateSchedule::new(
                thesis.thesis_id,
                caller.user_id,
                proposed_at,
                start_time,
                end_time,
                description.clone(),
                location.clone(),
            ))
            .await?;

        tracing::info!(%schedule_id, thesis_id = %thesis.thesis_id, "schedule created");

        Ok(Schedule {
            schedule_id,
            proposed_at,
            start_time,
            end_time,
            description,
            location,
            thesis,
            created_by: caller.identity(),
            decision: None,
        })
    }

    #[tracing::instrument(skip_all, fields(user_id = %caller.user_id))]
    pub async fn get_all(
        &self,
        caller: &User,
        pagination: PaginationRequest,
    ) -> AppResult<PaginatedList<Schedule>> {
        let list = self
            .schedule_repository
            .find_all(scope_for(caller), pagination)
            .await?;
        tracing::debug!(count = list.count, returned = list.items.len(), "schedules listed");
        Ok(list)
    }

    #[tracing::instrument(skip(self, caller), fields(user_id = %caller.user_id))]
    pub async fn get_detail(&self, caller: &User, schedule_id: ScheduleId) -> AppResult<Schedule> {
        let schedule = self.find_schedule(schedule_id).await?;
        if !can_view(caller, &schedule) {
            return Err(AppError::ForbiddenOperation(
                "this schedule is not visible to the caller".into(),
            ));
        }
        Ok(schedule)
    }

    #[tracing::instrument(skip_all, fields(user_id = %caller.user_id, schedule_id = %event.schedule_id))]
    pub async fn update(&self, caller: &User, event: UpdateSchedule) -> AppResult<Schedule> {
        let mut schedule = self.find_schedule(event.schedule_id).await?;

        // The thesis may have been removed since the schedule was proposed.
        let thesis_id = schedule.thesis.thesis_id;
        let thesis = self
            .thesis_repository
            .find_by_id(thesis_id, ThesisExpand::IDENTITY)
            .await?
            .ok_or_else(|| {
                tracing::warn!(%thesis_id, "thesis not found");
                AppError::EntityNotFound(format!("thesis ({thesis_id}) was not found"))
            })?;

        if schedule.created_by.user_id != caller.user_id {
            tracing::warn!("only the creator can change a schedule");
            return Err(AppError::ForbiddenOperation(
                "only the creator can change this schedule".into(),
            ));
        }
        if !schedule.is_pending() {
            return Err(AppError::UnprocessableEntity(format!(
                "schedule ({}) has already been {}",
                schedule.schedule_id,
                schedule.status().as_ref()
            )));
        }
        ensure_time_window(event.start_time, event.end_time)?;

        schedule.proposed_at = event.proposed_at;
        schedule.start_time = event.start_time;
        schedule.end_time = event.end_time;
        schedule.description = event.description.clone();
        schedule.location = event.location.clone();
        schedule.thesis = thesis;

        self.schedule_repository.update(event).await?;

        tracing::info!("schedule updated");
        Ok(schedule)
    }

    /// Approves or rejects a schedule on behalf of one of its thesis supervisors.
    #[tracing::instrument(skip_all, fields(user_id = %caller.user_id, schedule_id = %request.schedule_id, status = %request.status))]
    pub async fn approve(&self, caller: &User, request: ReviewSchedule) -> AppResult<()> {
        if caller.role.is_student() {
            tracing::warn!("student cannot approve schedules");
            return Err(AppError::ForbiddenOperation("access denied".into()));
        }
        let verdict = Verdict::parse(&request.status)?;

        let schedule = self.find_schedule(request.schedule_id).await?;

        let supervises = caller
            .lecturer_id()
            .is_some_and(|lecturer_id| schedule.thesis.is_supervised_by(lecturer_id));
        if !supervises {
            tracing::warn!("caller does not supervise the thesis of this schedule");
            return Err(AppError::ForbiddenOperation(
                "only a supervisor of the thesis can decide on this schedule".into(),
            ));
        }

        if !schedule.is_pending() && !self.config.allow_redecision {
            return Err(AppError::UnprocessableEntity(format!(
                "schedule ({}) has already been {}",
                schedule.schedule_id,
                schedule.status().as_ref()
            )));
        }

        self.schedule_repository
            .update_status(DecideSchedule::new(
                schedule.schedule_id,
                verdict,
                caller.user_id,
                self.config.allow_redecision,
            ))
            .await?;

        tracing::info!("schedule status updated");
        Ok(())
    }

    #[tracing::instrument(skip(self, caller), fields(user_id = %caller.user_id))]
    pub async fn delete(&self, caller: &User, schedule_id: ScheduleId) -> AppResult<()> {
        let schedule = self.find_schedule(schedule_id).await?;
        if !can_view(caller, &schedule) {
            return Err(AppError::ForbiddenOperation(
                "this schedule is not visible to the caller".into(),
            ));
        }

        self.schedule_repository
            .delete(DeleteSchedule::new(schedule_id))
            .await?;

        tracing::info!("schedule deleted");
        Ok(())
    }

    async fn find_schedule(&self, schedule_id: ScheduleId) -> AppResult<Schedule> {
        self.schedule_repository
            .find_by_id(schedule_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(%schedule_id, "schedule not found");
                AppError::EntityNotFound(format!("schedule ({schedule_id}) was not found"))
            })
    }

    async fn active_thesis(&self, student_id: StudentId) -> AppResult<Thesis> {
        let mut theses = self.thesis_repository.find_by_student(student_id).await?;
        if theses.len() > 1 {
            return Err(AppError::InvalidInput(format!(
                "student ({student_id}) has {} active theses",
                theses.len()
            )));
        }
        theses.pop().ok_or_else(|| {
            tracing::warn!(%student_id, "student has no thesis");
            AppError::EntityNotFound(format!("no thesis found for student ({student_id})"))
        })
    }
}

fn scope_for(caller: &User) -> ScheduleScope {
    match caller.role {
        Role::Student => ScheduleScope::CreatedBy(caller.user_id),
        Role::Lecturer | Role::PrimaryLecturer | Role::SecondaryLecturer => {
            ScheduleScope::SupervisedBy(caller.user_id)
        }
    }
}

// Same rule as the list scope, applied to a single loaded schedule.
fn can_view(caller: &User, schedule: &Schedule) -> bool {
    match scope_for(caller) {
        ScheduleScope::CreatedBy(user_id) => schedule.created_by.user_id == user_id,
        ScheduleScope::SupervisedBy(_) => caller
            .lecturer_id()
            .is_some_and(|lecturer_id| schedule.thesis.is_supervised_by(lecturer_id)),
    }
}
