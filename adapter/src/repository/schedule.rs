use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::{ScheduleId, ThesisId},
        list::{PaginatedList, PaginationRequest},
        schedule::{
            event::{CreateSchedule, DecideSchedule, DeleteSchedule, UpdateSchedule},
            Schedule, ScheduleScope, ScheduleStatus,
        },
        thesis::ThesisExpand,
    },
    repository::schedule::ScheduleRepository,
};
use shared::error::{AppError, AppResult};
use sqlx::{PgConnection, Postgres, QueryBuilder, Transaction};

use super::thesis::fetch_supervisors;
use crate::database::{
    model::schedule::ScheduleRow, set_transaction_repeatable_read, ConnectionPool,
};

// Profile names come from whichever of student/lecturer the user is linked to.
const SCHEDULE_SELECT: &str = r#"
    SELECT
        s.schedule_id,
        s.proposed_at,
        s.start_time,
        s.end_time,
        s.status,
        s.description AS schedule_description,
        s.location AS schedule_location,
        t.thesis_id,
        t.title,
        t.description,
        t.progress,
        st.student_id,
        st.name AS student_name,
        st.nim AS student_nim,
        NULL::TEXT AS student_study_program,
        NULL::TEXT AS student_faculty,
        cu.user_id AS created_by_id,
        cu.identifier AS created_by_identifier,
        cu.role AS created_by_role,
        COALESCE(cst.name, cl.name) AS created_by_name,
        au.user_id AS approved_by_id,
        au.identifier AS approved_by_identifier,
        au.role AS approved_by_role,
        COALESCE(ast.name, al.name) AS approved_by_name
    FROM schedules AS s
    INNER JOIN theses AS t ON t.thesis_id = s.thesis_id
    INNER JOIN students AS st ON st.student_id = t.student_id
    INNER JOIN users AS cu ON cu.user_id = s.created_by_id
    LEFT JOIN students AS cst ON cst.student_id = cu.student_id
    LEFT JOIN lecturers AS cl ON cl.lecturer_id = cu.lecturer_id
    LEFT JOIN users AS au ON au.user_id = s.approved_by_id
    LEFT JOIN students AS ast ON ast.student_id = au.student_id
    LEFT JOIN lecturers AS al ON al.lecturer_id = au.lecturer_id
"#;

/// Appends the WHERE clause restricting schedules to what `scope` may see.
/// Both the count and the page query of a listing go through here.
fn push_scope(qb: &mut QueryBuilder<'_, Postgres>, scope: ScheduleScope) {
    match scope {
        ScheduleScope::CreatedBy(user_id) => {
            qb.push(" WHERE s.created_by_id = ").push_bind(user_id);
        }
        ScheduleScope::SupervisedBy(user_id) => {
            qb.push(
                " WHERE s.thesis_id IN (SELECT ts.thesis_id FROM thesis_supervisors AS ts \
                 INNER JOIN users AS u ON u.lecturer_id = ts.lecturer_id WHERE u.user_id = ",
            )
            .push_bind(user_id)
            .push(")");
        }
    }
}

async fn load_schedules(
    conn: &mut PgConnection,
    rows: Vec<ScheduleRow>,
) -> AppResult<Vec<Schedule>> {
    let ids: Vec<ThesisId> = rows.iter().map(|row| row.thesis.thesis_id).collect();
    let supervisors = fetch_supervisors(conn, &ids, ThesisExpand::IDENTITY).await?;
    rows.into_iter()
        .map(|row| {
            let assigned = supervisors
                .get(&row.thesis.thesis_id)
                .cloned()
                .unwrap_or_default();
            row.into_schedule(assigned)
        })
        .collect()
}

// Locks the schedule row for the rest of the transaction and returns its status.
async fn lock_status(
    tx: &mut Transaction<'_, Postgres>,
    schedule_id: ScheduleId,
) -> AppResult<ScheduleStatus> {
    let status: Option<String> =
        sqlx::query_scalar("SELECT status FROM schedules WHERE schedule_id = $1 FOR UPDATE")
            .bind(schedule_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

    let Some(status) = status else {
        return Err(AppError::EntityNotFound(format!(
            "schedule ({schedule_id}) was not found"
        )));
    };
    status.parse().map_err(|_| {
        AppError::ConversionEntityError(format!("unknown schedule status: {status}"))
    })
}

#[derive(new)]
pub struct ScheduleRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ScheduleRepository for ScheduleRepositoryImpl {
    async fn create(&self, event: CreateSchedule) -> AppResult<ScheduleId> {
        let schedule_id = ScheduleId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO schedules
                (schedule_id, proposed_at, start_time, end_time, status,
                description, location, thesis_id, created_by_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(schedule_id)
        .bind(event.proposed_at)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(ScheduleStatus::Pending.as_ref())
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.thesis_id)
        .bind(event.created_by)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No schedule record has been created".into(),
            ));
        }

        Ok(schedule_id)
    }

    async fn find_by_id(&self, schedule_id: ScheduleId) -> AppResult<Option<Schedule>> {
        let mut conn = self.db.acquire().await?;

        let mut qb = QueryBuilder::<Postgres>::new(SCHEDULE_SELECT);
        qb.push(" WHERE s.schedule_id = ").push_bind(schedule_id);
        let row: Option<ScheduleRow> = qb
            .build_query_as()
            .fetch_optional(&mut *conn)
            .await
            .map_err(AppError::SpecificOperationError)?;

        match row {
            None => Ok(None),
            Some(row) => Ok(load_schedules(&mut conn, vec![row]).await?.pop()),
        }
    }

    async fn find_all(
        &self,
        scope: ScheduleScope,
        pagination: PaginationRequest,
    ) -> AppResult<PaginatedList<Schedule>> {
        let mut tx = self.db.begin().await?;
        set_transaction_repeatable_read(&mut tx).await?;

        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM schedules AS s");
        push_scope(&mut count_qb, scope);
        let count: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let mut page_qb = QueryBuilder::<Postgres>::new(SCHEDULE_SELECT);
        push_scope(&mut page_qb, scope);
        page_qb
            .push(" ORDER BY s.created_at DESC, s.schedule_id LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());
        let rows: Vec<ScheduleRow> = page_qb
            .build_query_as()
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let items = load_schedules(&mut tx, rows).await?;
        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(PaginatedList::new(items, pagination, count))
    }

    async fn update(&self, event: UpdateSchedule) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // Only a pending schedule may be rescheduled. The row stays locked
        // until commit so a concurrent decision cannot slip in between.
        {
            let status = lock_status(&mut tx, event.schedule_id).await?;
            if status != ScheduleStatus::Pending {
                tracing::warn!(schedule_id = %event.schedule_id, status = status.as_ref(), "schedule is no longer pending");
                return Err(AppError::UnprocessableEntity(format!(
                    "schedule ({}) has already been {}",
                    event.schedule_id,
                    status.as_ref()
                )));
            }
        }

        let res = sqlx::query(
            r#"
                UPDATE schedules
                SET proposed_at = $1, start_time = $2, end_time = $3,
                    description = $4, location = $5
                WHERE schedule_id = $6
            "#,
        )
        .bind(event.proposed_at)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.schedule_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No schedule record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }

    async fn update_status(&self, event: DecideSchedule) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        {
            let status = lock_status(&mut tx, event.schedule_id).await?;
            if status != ScheduleStatus::Pending && !event.allow_redecision {
                tracing::warn!(schedule_id = %event.schedule_id, status = status.as_ref(), "schedule has already been decided");
                return Err(AppError::UnprocessableEntity(format!(
                    "schedule ({}) has already been {}",
                    event.schedule_id,
                    status.as_ref()
                )));
            }
        }

        // Status and approver are written together to keep the table CHECK satisfied.
        let status: ScheduleStatus = event.verdict.into();
        let res = sqlx::query(
            r#"
                UPDATE schedules
                SET status = $1, approved_by_id = $2
                WHERE schedule_id = $3
            "#,
        )
        .bind(status.as_ref())
        .bind(event.decided_by)
        .bind(event.schedule_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No schedule record has been decided".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }

    async fn delete(&self, event: DeleteSchedule) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM schedules WHERE schedule_id = $1")
            .bind(event.schedule_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "schedule ({}) was not found",
                event.schedule_id
            )));
        }
        Ok(())
    }
}
