//! In-memory implementation of every repository trait, used by the workflow tests.

use crate::{
    model::{
        auth::AccessToken,
        id::{LecturerId, ScheduleId, StudentId, ThesisId, UserId},
        list::{PaginatedList, PaginationRequest},
        role::{Identifier, Role},
        schedule::{
            event::{CreateSchedule, DecideSchedule, DeleteSchedule, UpdateSchedule},
            Decision, Schedule, ScheduleScope, ScheduleStatus, Verdict,
        },
        thesis::{event::UpdateThesis, Progress, Supervisor, Thesis, ThesisExpand, ThesisStudent},
        user::{Affiliation, Profile, User},
    },
    repository::{
        auth::AuthRepository, schedule::ScheduleRepository, thesis::ThesisRepository,
        user::UserRepository,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{
    config::WorkflowConfig,
    error::{AppError, AppResult},
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use super::{schedule::ScheduleWorkflow, thesis::ThesisWorkflow};

struct StoredSchedule {
    schedule_id: ScheduleId,
    proposed_at: DateTime<Utc>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    description: String,
    location: String,
    thesis_id: ThesisId,
    created_by: UserId,
    status: ScheduleStatus,
    approved_by: Option<UserId>,
}

#[derive(Default)]
pub(crate) struct InMemoryStore {
    tokens: Mutex<HashMap<String, UserId>>,
    users: Mutex<HashMap<UserId, User>>,
    // Insertion order doubles as creation order.
    theses: Mutex<Vec<Thesis>>,
    schedules: Mutex<Vec<StoredSchedule>>,
}

impl InMemoryStore {
    pub(crate) fn issue_token(&self, user_id: UserId) -> AccessToken {
        let token = format!("token-{user_id}");
        self.tokens.lock().unwrap().insert(token.clone(), user_id);
        AccessToken(token)
    }

    pub(crate) fn add_user(&self, user: User) {
        self.users.lock().unwrap().insert(user.user_id, user);
    }

    pub(crate) fn add_thesis(&self, thesis: Thesis) {
        self.theses.lock().unwrap().push(thesis);
    }

    pub(crate) fn remove_thesis(&self, thesis_id: ThesisId) {
        self.theses
            .lock()
            .unwrap()
            .retain(|t| t.thesis_id != thesis_id);
    }

    fn thesis(&self, thesis_id: ThesisId) -> Option<Thesis> {
        self.theses
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.thesis_id == thesis_id)
            .cloned()
    }

    fn hydrate(&self, row: &StoredSchedule) -> Option<Schedule> {
        let users = self.users.lock().unwrap();
        let created_by = users.get(&row.created_by)?.identity();
        let decision = match (row.status, row.approved_by) {
            (ScheduleStatus::Pending, _) => None,
            (status, Some(approver)) => Some(Decision {
                verdict: Verdict::try_from(status).ok()?,
                decided_by: users.get(&approver)?.identity(),
            }),
            (_, None) => return None,
        };
        Some(Schedule {
            schedule_id: row.schedule_id,
            proposed_at: row.proposed_at,
            start_time: row.start_time,
            end_time: row.end_time,
            description: row.description.clone(),
            location: row.location.clone(),
            thesis: self.thesis(row.thesis_id)?,
            created_by,
            decision,
        })
    }

    fn in_scope(&self, row: &StoredSchedule, scope: ScheduleScope) -> bool {
        match scope {
            ScheduleScope::CreatedBy(user_id) => row.created_by == user_id,
            ScheduleScope::SupervisedBy(user_id) => {
                let lecturer_id = self
                    .users
                    .lock()
                    .unwrap()
                    .get(&user_id)
                    .and_then(User::lecturer_id);
                match (lecturer_id, self.thesis(row.thesis_id)) {
                    (Some(lecturer_id), Some(thesis)) => thesis.is_supervised_by(lecturer_id),
                    _ => false,
                }
            }
        }
    }
}

fn strip_affiliation(mut thesis: Thesis, expand: ThesisExpand) -> Thesis {
    if !expand.affiliation {
        thesis.student.affiliation = None;
        for s in thesis.supervisors.iter_mut() {
            s.affiliation = None;
        }
    }
    thesis
}

#[async_trait]
impl AuthRepository for InMemoryStore {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        Ok(self.tokens.lock().unwrap().get(&access_token.0).copied())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }
}

#[async_trait]
impl ThesisRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        thesis_id: ThesisId,
        expand: ThesisExpand,
    ) -> AppResult<Option<Thesis>> {
        Ok(self.thesis(thesis_id).map(|t| strip_affiliation(t, expand)))
    }

    async fn find_by_student(&self, student_id: StudentId) -> AppResult<Vec<Thesis>> {
        Ok(self
            .theses
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.student.student_id == student_id)
            .cloned()
            .map(|t| strip_affiliation(t, ThesisExpand::IDENTITY))
            .collect())
    }

    async fn find_all_by_lecturer(
        &self,
        lecturer_id: LecturerId,
        pagination: PaginationRequest,
    ) -> AppResult<PaginatedList<Thesis>> {
        let matching: Vec<Thesis> = self
            .theses
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|t| t.is_supervised_by(lecturer_id))
            .cloned()
            .collect();
        let count = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();
        Ok(PaginatedList::new(items, pagination, count))
    }

    async fn update(&self, event: UpdateThesis) -> AppResult<()> {
        let mut theses = self.theses.lock().unwrap();
        let thesis = theses
            .iter_mut()
            .find(|t| t.thesis_id == event.thesis_id)
            .ok_or_else(|| AppError::EntityNotFound("thesis not found".into()))?;
        thesis.title = event.title;
        thesis.description = event.description;
        thesis.progress = event.progress;
        Ok(())
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryStore {
    async fn create(&self, event: CreateSchedule) -> AppResult<ScheduleId> {
        let schedule_id = ScheduleId::new();
        self.schedules.lock().unwrap().push(StoredSchedule {
            schedule_id,
            proposed_at: event.proposed_at,
            start_time: event.start_time,
            end_time: event.end_time,
            description: event.description,
            location: event.location,
            thesis_id: event.thesis_id,
            created_by: event.created_by,
            status: ScheduleStatus::Pending,
            approved_by: None,
        });
        Ok(schedule_id)
    }

    async fn find_by_id(&self, schedule_id: ScheduleId) -> AppResult<Option<Schedule>> {
        let schedules = self.schedules.lock().unwrap();
        Ok(schedules
            .iter()
            .find(|s| s.schedule_id == schedule_id)
            .and_then(|s| self.hydrate(s)))
    }

    async fn find_all(
        &self,
        scope: ScheduleScope,
        pagination: PaginationRequest,
    ) -> AppResult<PaginatedList<Schedule>> {
        let schedules = self.schedules.lock().unwrap();
        let matching: Vec<&StoredSchedule> = schedules
            .iter()
            .rev()
            .filter(|s| self.in_scope(s, scope))
            .collect();
        let count = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .filter_map(|s| self.hydrate(s))
            .collect();
        Ok(PaginatedList::new(items, pagination, count))
    }

    async fn update(&self, event: UpdateSchedule) -> AppResult<()> {
        let mut schedules = self.schedules.lock().unwrap();
        let row = schedules
            .iter_mut()
            .find(|s| s.schedule_id == event.schedule_id)
            .ok_or_else(|| AppError::EntityNotFound("schedule not found".into()))?;
        if row.status != ScheduleStatus::Pending {
            return Err(AppError::UnprocessableEntity("schedule is not pending".into()));
        }
        row.proposed_at = event.proposed_at;
        row.start_time = event.start_time;
        row.end_time = event.end_time;
        row.description = event.description;
        row.location = event.location;
        Ok(())
    }

    async fn update_status(&self, event: DecideSchedule) -> AppResult<()> {
        let mut schedules = self.schedules.lock().unwrap();
        let row = schedules
            .iter_mut()
            .find(|s| s.schedule_id == event.schedule_id)
            .ok_or_else(|| AppError::EntityNotFound("schedule not found".into()))?;
        if row.status != ScheduleStatus::Pending && !event.allow_redecision {
            return Err(AppError::UnprocessableEntity("already decided".into()));
        }
        row.status = event.verdict.into();
        row.approved_by = Some(event.decided_by);
        Ok(())
    }

    async fn delete(&self, event: DeleteSchedule) -> AppResult<()> {
        let mut schedules = self.schedules.lock().unwrap();
        let before = schedules.len();
        schedules.retain(|s| s.schedule_id != event.schedule_id);
        if schedules.len() == before {
            return Err(AppError::EntityNotFound("schedule not found".into()));
        }
        Ok(())
    }
}

fn student_user(name: &str, nim: &str) -> User {
    User {
        user_id: UserId::new(),
        identifier: Identifier::Nim(nim.into()),
        role: Role::Student,
        profile: Some(Profile::Student {
            student_id: StudentId::new(),
            name: name.into(),
        }),
    }
}

fn lecturer_user(name: &str, nip: &str, role: Role) -> User {
    User {
        user_id: UserId::new(),
        identifier: Identifier::Nip(nip.into()),
        role,
        profile: Some(Profile::Lecturer {
            lecturer_id: LecturerId::new(),
            name: name.into(),
        }),
    }
}

fn supervisor_of(user: &User) -> Supervisor {
    Supervisor {
        lecturer_id: user.lecturer_id().unwrap(),
        name: user.display_name().into(),
        nip: user.identifier.as_str().into(),
        affiliation: Some(Affiliation {
            study_program: "Informatics".into(),
            faculty: "Intelligent Electrical and Informatics Technology".into(),
        }),
    }
}

fn thesis_for(owner: &User, title: &str, supervisors: &[&User]) -> Thesis {
    Thesis {
        thesis_id: ThesisId::new(),
        title: title.into(),
        description: format!("{title} description"),
        progress: Progress::Bab1,
        student: ThesisStudent {
            student_id: owner.student_id().unwrap(),
            name: owner.display_name().into(),
            nim: owner.identifier.as_str().into(),
            affiliation: Some(Affiliation {
                study_program: "Informatics".into(),
                faculty: "Intelligent Electrical and Informatics Technology".into(),
            }),
        },
        supervisors: supervisors.iter().map(|u| supervisor_of(u)).collect(),
    }
}

/// Two students with one thesis each. `thesis` is supervised by `l1` and `l2`,
/// `other_thesis` by `outsider` only.
pub(crate) struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub student: User,
    pub other_student: User,
    pub l1: User,
    pub l2: User,
    pub outsider: User,
    pub thesis: Thesis,
    pub other_thesis: Thesis,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let student = student_user("Siti Rahma", "5025201001");
        let other_student = student_user("Budi Santoso", "5025201002");
        let l1 = lecturer_user("Dr. Ahmad", "198001012005011001", Role::PrimaryLecturer);
        let l2 = lecturer_user("Dr. Wulan", "198502022010122002", Role::SecondaryLecturer);
        let outsider = lecturer_user("Dr. Hadi", "197703032003121003", Role::Lecturer);

        let thesis = thesis_for(&student, "Graph Based Scheduling", &[&l1, &l2]);
        let other_thesis = thesis_for(&other_student, "Federated Learning", &[&outsider]);

        for user in [&student, &other_student, &l1, &l2, &outsider] {
            store.add_user(user.clone());
        }
        store.add_thesis(thesis.clone());
        store.add_thesis(other_thesis.clone());

        Self {
            store,
            student,
            other_student,
            l1,
            l2,
            outsider,
            thesis,
            other_thesis,
        }
    }

    pub(crate) fn schedule_workflow(&self, allow_redecision: bool) -> ScheduleWorkflow {
        ScheduleWorkflow::new(
            self.store.clone(),
            self.store.clone(),
            WorkflowConfig { allow_redecision },
        )
    }

    pub(crate) fn thesis_workflow(&self) -> ThesisWorkflow {
        ThesisWorkflow::new(self.store.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_users_are_distinct() {
        let f = Fixture::new();
        assert_ne!(f.student.user_id, f.other_student.user_id);
        assert_ne!(f.student.student_id(), f.other_student.student_id());
        assert_eq!(f.other_student.identifier, Identifier::Nim("5025201002".into()));
        assert_eq!(f.other_thesis.student.nim, "5025201002");
        assert_eq!(f.thesis.supervisors.len(), 2);
    }
}
