//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::entity::analytics::{AnalyticsSnapshot, MONTHLY_TREND_LIMIT};
use crate::domain::entity::feedback::{
    AppliedUpdate, Feedback, NewFeedback, StatusChange, TrackingStatus,
};
use crate::domain::entity::internal_note::InternalNote;
use crate::domain::filter::FeedbackFilter;
use crate::domain::repository::{AnalyticsRepository, FeedbackRepository};
use crate::domain::value_object::{
    category::Category, department::Department, feedback_id::FeedbackId,
    message::FeedbackMessage, status::FeedbackStatus, tracking_id::TrackingId,
};
use crate::error::{FeedbackError, FeedbackResult};

const SELECT_FEEDBACK: &str = r#"
    SELECT
        id,
        tracking_id,
        category,
        message,
        status,
        department,
        created_at,
        updated_at
    FROM feedback
"#;

/// PostgreSQL-backed feedback and analytics repository
#[derive(Clone)]
pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl FeedbackRepository for PgFeedbackRepository {
    async fn create(&self, feedback: &NewFeedback) -> FeedbackResult<Feedback> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            r#"
            INSERT INTO feedback (
                tracking_id,
                category,
                message,
                status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING
                id,
                tracking_id,
                category,
                message,
                status,
                department,
                created_at,
                updated_at
            "#,
        )
        .bind(feedback.tracking_id.as_uuid())
        .bind(feedback.category.code())
        .bind(feedback.message.as_str())
        .bind(feedback.status().code())
        .bind(feedback.created_at)
        .fetch_one(&self.pool)
        .await?;

        row.into_feedback(Vec::new(), Vec::new())
    }

    async fn find_by_tracking_id(
        &self,
        tracking_id: &TrackingId,
    ) -> FeedbackResult<Option<TrackingStatus>> {
        let row = sqlx::query_as::<_, TrackingRow>(
            r#"
            SELECT tracking_id, status, category, created_at
            FROM feedback
            WHERE tracking_id = $1
            "#,
        )
        .bind(tracking_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_tracking_status()).transpose()
    }

    async fn list(&self, filter: &FeedbackFilter) -> FeedbackResult<Vec<Feedback>> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_FEEDBACK);
        query.push(" WHERE TRUE");

        if let Some(category) = filter.category {
            query.push(" AND category = ").push_bind(category.code());
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.code());
        }
        if let Some(start) = filter.start {
            query.push(" AND created_at >= ").push_bind(start);
        }
        if let Some(end) = filter.end {
            query.push(" AND created_at <= ").push_bind(end);
        }
        query.push(" ORDER BY created_at DESC, id DESC");

        let mut conn = self.pool.acquire().await?;

        let rows = query
            .build_query_as::<FeedbackRow>()
            .fetch_all(&mut *conn)
            .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut history = load_history(&mut *conn, &ids).await?;
        let mut notes = load_notes(&mut *conn, &ids).await?;

        rows.into_iter()
            .map(|row| {
                let h = history.remove(&row.id).unwrap_or_default();
                let n = notes.remove(&row.id).unwrap_or_default();
                row.into_feedback(h, n)
            })
            .collect()
    }

    async fn update_with<F>(&self, id: FeedbackId, apply: F) -> FeedbackResult<Feedback>
    where
        F: FnOnce(&mut Feedback) -> FeedbackResult<AppliedUpdate> + Send,
    {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, FeedbackRow>(&format!(
            "{SELECT_FEEDBACK} WHERE id = $1 FOR UPDATE"
        ))
        .bind(id.value())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(FeedbackError::NotFound)?;

        let ids = [row.id];
        let history = load_history(&mut *tx, &ids)
            .await?
            .remove(&row.id)
            .unwrap_or_default();
        let notes = load_notes(&mut *tx, &ids)
            .await?
            .remove(&row.id)
            .unwrap_or_default();

        let mut feedback = row.into_feedback(history, notes)?;

        // Dropping `tx` on error rolls back
        let applied = apply(&mut feedback)?;

        sqlx::query(
            r#"
            UPDATE feedback SET
                status = $2,
                department = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .bind(feedback.status.code())
        .bind(feedback.department.map(|d| d.code()))
        .bind(applied.updated_at)
        .execute(&mut *tx)
        .await?;

        if let Some(change) = &applied.status_change {
            sqlx::query(
                r#"
                INSERT INTO feedback_status_history (
                    feedback_id,
                    from_status,
                    to_status,
                    note,
                    changed_at
                ) VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(id.value())
            .bind(change.from_status.code())
            .bind(change.to_status.code())
            .bind(change.note.as_deref())
            .bind(change.changed_at)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(note) = &applied.note {
            let note_id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO feedback_internal_notes (feedback_id, note, created_at)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(id.value())
            .bind(note)
            .bind(applied.updated_at)
            .fetch_one(&mut *tx)
            .await?;

            if let Some(last) = feedback.internal_notes.last_mut() {
                last.id = note_id;
            }
        }

        tx.commit().await?;

        Ok(feedback)
    }
}

impl AnalyticsRepository for PgFeedbackRepository {
    async fn snapshot(&self) -> FeedbackResult<AnalyticsSnapshot> {
        let mut tx = self.pool.begin().await?;

        // One snapshot for every count; writers are not blocked
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let total_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM feedback")
            .fetch_one(&mut *tx)
            .await?;

        let by_category = sqlx::query_as::<_, (String, i64)>(
            "SELECT category, COUNT(*) FROM feedback GROUP BY category",
        )
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(|(code, count)| {
            let category = decode(Category::from_code(&code), "category", &code)?;
            Ok((category, count))
        })
        .collect::<FeedbackResult<Vec<_>>>()?;

        let by_status = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM feedback GROUP BY status",
        )
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(|(code, count)| {
            let status = decode(FeedbackStatus::from_code(&code), "status", &code)?;
            Ok((status, count))
        })
        .collect::<FeedbackResult<Vec<_>>>()?;

        let by_month = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT
                to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM') AS month,
                COUNT(*)
            FROM feedback
            GROUP BY month
            ORDER BY month DESC
            LIMIT $1
            "#,
        )
        .bind(MONTHLY_TREND_LIMIT as i64)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(AnalyticsSnapshot {
            total_count,
            by_category,
            by_status,
            by_month,
        })
    }
}

async fn load_history(
    conn: &mut PgConnection,
    ids: &[i64],
) -> FeedbackResult<HashMap<i64, Vec<StatusChange>>> {
    let rows = sqlx::query_as::<_, HistoryRow>(
        r#"
        SELECT feedback_id, from_status, to_status, note, changed_at
        FROM feedback_status_history
        WHERE feedback_id = ANY($1)
        ORDER BY feedback_id, id
        "#,
    )
    .bind(ids)
    .fetch_all(conn)
    .await?;

    let mut grouped: HashMap<i64, Vec<StatusChange>> = HashMap::new();
    for row in rows {
        let feedback_id = row.feedback_id;
        grouped
            .entry(feedback_id)
            .or_default()
            .push(row.into_change()?);
    }
    Ok(grouped)
}

async fn load_notes(
    conn: &mut PgConnection,
    ids: &[i64],
) -> FeedbackResult<HashMap<i64, Vec<InternalNote>>> {
    let rows = sqlx::query_as::<_, NoteRow>(
        r#"
        SELECT id, feedback_id, note, created_at
        FROM feedback_internal_notes
        WHERE feedback_id = ANY($1)
        ORDER BY feedback_id, id
        "#,
    )
    .bind(ids)
    .fetch_all(conn)
    .await?;

    let mut grouped: HashMap<i64, Vec<InternalNote>> = HashMap::new();
    for row in rows {
        grouped.entry(row.feedback_id).or_default().push(InternalNote {
            id: row.id,
            note: row.note,
            created_at: row.created_at,
        });
    }
    Ok(grouped)
}

/// Stored codes are guarded by CHECK constraints; a miss means schema drift.
fn decode<T>(value: Option<T>, column: &str, code: &str) -> FeedbackResult<T> {
    value.ok_or_else(|| FeedbackError::Internal(format!("Unknown {column} code: {code}")))
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct FeedbackRow {
    id: i64,
    tracking_id: Uuid,
    category: String,
    message: String,
    status: String,
    department: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FeedbackRow {
    fn into_feedback(
        self,
        status_history: Vec<StatusChange>,
        internal_notes: Vec<InternalNote>,
    ) -> FeedbackResult<Feedback> {
        let department = self
            .department
            .map(|code| decode(Department::from_code(&code), "department", &code))
            .transpose()?;

        Ok(Feedback {
            id: FeedbackId::new(self.id),
            tracking_id: TrackingId::from_uuid(self.tracking_id),
            category: decode(Category::from_code(&self.category), "category", &self.category)?,
            message: FeedbackMessage::from_db(self.message),
            status: decode(FeedbackStatus::from_code(&self.status), "status", &self.status)?,
            department,
            status_history,
            internal_notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TrackingRow {
    tracking_id: Uuid,
    status: String,
    category: String,
    created_at: DateTime<Utc>,
}

impl TrackingRow {
    fn into_tracking_status(self) -> FeedbackResult<TrackingStatus> {
        Ok(TrackingStatus {
            tracking_id: TrackingId::from_uuid(self.tracking_id),
            status: decode(FeedbackStatus::from_code(&self.status), "status", &self.status)?,
            category: decode(Category::from_code(&self.category), "category", &self.category)?,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    feedback_id: i64,
    from_status: String,
    to_status: String,
    note: Option<String>,
    changed_at: DateTime<Utc>,
}

impl HistoryRow {
    fn into_change(self) -> FeedbackResult<StatusChange> {
        Ok(StatusChange {
            from_status: decode(
                FeedbackStatus::from_code(&self.from_status),
                "status",
                &self.from_status,
            )?,
            to_status: decode(
                FeedbackStatus::from_code(&self.to_status),
                "status",
                &self.to_status,
            )?,
            changed_at: self.changed_at,
            note: self.note,
        })
    }
}

#[derive(sqlx::FromRow)]
struct NoteRow {
    id: i64,
    feedback_id: i64,
    note: String,
    created_at: DateTime<Utc>,
}
