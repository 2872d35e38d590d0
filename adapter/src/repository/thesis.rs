use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::{LecturerId, StudentId, ThesisId},
        list::{PaginatedList, PaginationRequest},
        thesis::{event::UpdateThesis, Supervisor, Thesis, ThesisExpand},
    },
    repository::thesis::ThesisRepository,
};
use shared::error::{AppError, AppResult};
use sqlx::{PgConnection, Postgres, QueryBuilder};
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::{
    model::thesis::{SupervisorRow, ThesisRow},
    set_transaction_repeatable_read, ConnectionPool,
};

const THESIS_IDENTITY_SELECT: &str = r#"
    SELECT
        t.thesis_id,
        t.title,
        t.description,
        t.progress,
        st.student_id,
        st.name AS student_name,
        st.nim AS student_nim,
        NULL::TEXT AS student_study_program,
        NULL::TEXT AS student_faculty
    FROM theses AS t
    INNER JOIN students AS st ON st.student_id = t.student_id
"#;

const THESIS_FULL_SELECT: &str = r#"
    SELECT
        t.thesis_id,
        t.title,
        t.description,
        t.progress,
        st.student_id,
        st.name AS student_name,
        st.nim AS student_nim,
        sp.name AS student_study_program,
        f.name AS student_faculty
    FROM theses AS t
    INNER JOIN students AS st ON st.student_id = t.student_id
    LEFT JOIN study_programs AS sp ON sp.study_program_id = st.study_program_id
    LEFT JOIN faculties AS f ON f.faculty_id = sp.faculty_id
"#;

const SUPERVISOR_IDENTITY_SELECT: &str = r#"
    SELECT
        ts.thesis_id,
        l.lecturer_id,
        l.name,
        l.nip,
        NULL::TEXT AS study_program,
        NULL::TEXT AS faculty
    FROM thesis_supervisors AS ts
    INNER JOIN lecturers AS l ON l.lecturer_id = ts.lecturer_id
    WHERE ts.thesis_id = ANY($1)
    ORDER BY ts.thesis_id, ts.ordinal, l.name
"#;

const SUPERVISOR_FULL_SELECT: &str = r#"
    SELECT
        ts.thesis_id,
        l.lecturer_id,
        l.name,
        l.nip,
        sp.name AS study_program,
        f.name AS faculty
    FROM thesis_supervisors AS ts
    INNER JOIN lecturers AS l ON l.lecturer_id = ts.lecturer_id
    LEFT JOIN study_programs AS sp ON sp.study_program_id = l.study_program_id
    LEFT JOIN faculties AS f ON f.faculty_id = sp.faculty_id
    WHERE ts.thesis_id = ANY($1)
    ORDER BY ts.thesis_id, ts.ordinal, l.name
"#;

fn thesis_select(expand: ThesisExpand) -> &'static str {
    if expand.affiliation {
        THESIS_FULL_SELECT
    } else {
        THESIS_IDENTITY_SELECT
    }
}

fn push_supervised_by_lecturer(qb: &mut QueryBuilder<'_, Postgres>, lecturer_id: LecturerId) {
    qb.push(
        " WHERE t.thesis_id IN (SELECT ts.thesis_id FROM thesis_supervisors AS ts WHERE ts.lecturer_id = ",
    )
    .push_bind(lecturer_id)
    .push(")");
}

/// Loads the supervisors of every given thesis in one query, grouped by
/// thesis and kept in assignment order.
pub(crate) async fn fetch_supervisors(
    conn: &mut PgConnection,
    thesis_ids: &[ThesisId],
    expand: ThesisExpand,
) -> AppResult<HashMap<ThesisId, Vec<Supervisor>>> {
    if thesis_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let ids: Vec<Uuid> = thesis_ids.iter().map(|id| id.raw()).collect();
    let query = if expand.affiliation {
        SUPERVISOR_FULL_SELECT
    } else {
        SUPERVISOR_IDENTITY_SELECT
    };
    let rows: Vec<SupervisorRow> = sqlx::query_as(query)
        .bind(ids)
        .fetch_all(conn)
        .await
        .map_err(AppError::SpecificOperationError)?;

    let mut grouped: HashMap<ThesisId, Vec<Supervisor>> = HashMap::new();
    for row in rows {
        grouped.entry(row.thesis_id).or_default().push(row.into());
    }
    Ok(grouped)
}

async fn load_theses(
    conn: &mut PgConnection,
    rows: Vec<ThesisRow>,
    expand: ThesisExpand,
) -> AppResult<Vec<Thesis>> {
    let ids: Vec<ThesisId> = rows.iter().map(|row| row.thesis_id).collect();
    let mut supervisors = fetch_supervisors(conn, &ids, expand).await?;
    rows.into_iter()
        .map(|row| {
            let assigned = supervisors.remove(&row.thesis_id).unwrap_or_default();
            row.into_thesis(assigned)
        })
        .collect()
}

#[derive(new)]
pub struct ThesisRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ThesisRepository for ThesisRepositoryImpl {
    async fn find_by_id(
        &self,
        thesis_id: ThesisId,
        expand: ThesisExpand,
    ) -> AppResult<Option<Thesis>> {
        let mut conn = self.db.acquire().await?;

        let mut qb = QueryBuilder::<Postgres>::new(thesis_select(expand));
        qb.push(" WHERE t.thesis_id = ").push_bind(thesis_id);
        let row: Option<ThesisRow> = qb
            .build_query_as()
            .fetch_optional(&mut *conn)
            .await
            .map_err(AppError::SpecificOperationError)?;

        match row {
            None => Ok(None),
            Some(row) => Ok(load_theses(&mut conn, vec![row], expand).await?.pop()),
        }
    }

    async fn find_by_student(&self, student_id: StudentId) -> AppResult<Vec<Thesis>> {
        let mut conn = self.db.acquire().await?;

        let mut qb = QueryBuilder::<Postgres>::new(thesis_select(ThesisExpand::IDENTITY));
        qb.push(" WHERE t.student_id = ")
            .push_bind(student_id)
            .push(" ORDER BY t.created_at DESC");
        let rows: Vec<ThesisRow> = qb
            .build_query_as()
            .fetch_all(&mut *conn)
            .await
            .map_err(AppError::SpecificOperationError)?;

        load_theses(&mut conn, rows, ThesisExpand::IDENTITY).await
    }

    async fn find_all_by_lecturer(
        &self,
        lecturer_id: LecturerId,
        pagination: PaginationRequest,
    ) -> AppResult<PaginatedList<Thesis>> {
        let mut tx = self.db.begin().await?;
        set_transaction_repeatable_read(&mut tx).await?;

        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM theses AS t");
        push_supervised_by_lecturer(&mut count_qb, lecturer_id);
        let count: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let mut page_qb = QueryBuilder::<Postgres>::new(thesis_select(ThesisExpand::IDENTITY));
        push_supervised_by_lecturer(&mut page_qb, lecturer_id);
        page_qb
            .push(" ORDER BY t.created_at DESC, t.thesis_id LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());
        let rows: Vec<ThesisRow> = page_qb
            .build_query_as()
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let items = load_theses(&mut tx, rows, ThesisExpand::IDENTITY).await?;
        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(PaginatedList::new(items, pagination, count))
    }

    async fn update(&self, event: UpdateThesis) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE theses
                SET title = $1, description = $2, progress = $3
                WHERE thesis_id = $4
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.progress.as_ref())
        .bind(event.thesis_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "thesis ({}) was not found",
                event.thesis_id
            )));
        }
        Ok(())
    }
}
