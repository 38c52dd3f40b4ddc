use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::JobStore;
use crate::models::{Job, JobChanges, JobFilter, JobStats, NewJob};
use crate::types::{AppError, AppResult, JobStatus, SortOrder, WorkType};

const JOB_COLUMNS: &str =
    "id, owner_id, company, position, work_location, work_type, status, created_at, updated_at";

// Note: FromRow is needed for runtime query_as (without DATABASE_URL at compile time)
#[derive(Debug, sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    owner_id: Uuid,
    company: String,
    position: String,
    work_location: String,
    work_type: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = AppError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |e: AppError| AppError::Internal(format!("job {} has {}", id, e));
        Ok(Job {
            id: row.id,
            owner: row.owner_id,
            work_type: row.work_type.parse().map_err(corrupt)?,
            status: row.status.parse().map_err(corrupt)?,
            company: row.company,
            position: row.position,
            work_location: row.work_location,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Escape `%`, `_` and `\` so a search term matches literally inside ILIKE
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn order_clause(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Latest => " ORDER BY created_at DESC",
        SortOrder::Oldest => " ORDER BY created_at ASC",
        SortOrder::PositionAsc => " ORDER BY lower(position) ASC",
        SortOrder::PositionDesc => " ORDER BY lower(position) DESC",
    }
}

const DELETE_SQL: &str = "DELETE FROM jobs WHERE id = $1 AND owner_id = $2";

const STATUS_COUNTS_SQL: &str =
    "SELECT status, COUNT(*) FROM jobs WHERE owner_id = $1 GROUP BY status";

const WORK_TYPE_COUNTS_SQL: &str =
    "SELECT work_type, COUNT(*) FROM jobs WHERE owner_id = $1 GROUP BY work_type";

const MONTHLY_COUNTS_SQL: &str = r#"
    SELECT date_trunc('month', created_at AT TIME ZONE 'UTC')::date AS month, COUNT(*)
    FROM jobs
    WHERE owner_id = $1
    GROUP BY month
    ORDER BY month DESC
    LIMIT 6
"#;

/// `SELECT` for one owner's jobs with the filter's predicates and ordering
fn list_query(owner: Uuid, filter: &JobFilter) -> QueryBuilder<'static, Postgres> {
    let mut query =
        QueryBuilder::<Postgres>::new(format!("SELECT {JOB_COLUMNS} FROM jobs WHERE owner_id = "));
    query.push_bind(owner);

    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(work_type) = filter.work_type {
        query.push(" AND work_type = ").push_bind(work_type.as_str());
    }
    if let Some(term) = filter.search_term() {
        query
            .push(" AND position ILIKE ")
            .push_bind(format!("%{}%", escape_like(term)));
    }
    query.push(order_clause(filter.sort.unwrap_or_default()));
    query
}

/// `UPDATE` setting only the changed columns, scoped to `owner`
fn update_query(owner: Uuid, id: Uuid, changes: JobChanges) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::<Postgres>::new("UPDATE jobs SET updated_at = NOW()");

    if let Some(company) = changes.company {
        query.push(", company = ").push_bind(company);
    }
    if let Some(position) = changes.position {
        query.push(", position = ").push_bind(position);
    }
    if let Some(work_location) = changes.work_location {
        query.push(", work_location = ").push_bind(work_location);
    }
    if let Some(work_type) = changes.work_type {
        query.push(", work_type = ").push_bind(work_type.as_str());
    }
    if let Some(status) = changes.status {
        query.push(", status = ").push_bind(status.as_str());
    }

    query
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND owner_id = ")
        .push_bind(owner)
        .push(format!(" RETURNING {JOB_COLUMNS}"));
    query
}

/// Postgres-backed job store
#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn create(&self, owner: Uuid, job: NewJob) -> AppResult<Job> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO jobs (id, owner_id, company, position, work_location, work_type, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(&job.company)
        .bind(&job.position)
        .bind(&job.work_location)
        .bind(job.work_type.as_str())
        .bind(job.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_owner(&self, owner: Uuid, filter: &JobFilter) -> AppResult<Vec<Job>> {
        let mut query = list_query(owner, filter);
        let rows = query
            .build_query_as::<JobRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Job::try_from).collect()
    }

    async fn find_one(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Job>> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Job::try_from).transpose()
    }

    async fn update(&self, owner: Uuid, id: Uuid, changes: JobChanges) -> AppResult<Option<Job>> {
        let mut query = update_query(owner, id, changes);
        let row = query
            .build_query_as::<JobRow>()
            .fetch_optional(&self.pool)
            .await?;

        row.map(Job::try_from).transpose()
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(DELETE_SQL)
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn stats(&self, owner: Uuid) -> AppResult<JobStats> {
        let by_status: Vec<(String, i64)> = sqlx::query_as(STATUS_COUNTS_SQL)
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        let by_work_type: Vec<(String, i64)> = sqlx::query_as(WORK_TYPE_COUNTS_SQL)
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        let monthly: Vec<(NaiveDate, i64)> = sqlx::query_as(MONTHLY_COUNTS_SQL)
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        let by_status = by_status
            .into_iter()
            .map(|(status, count)| status.parse::<JobStatus>().map(|s| (s, count)))
            .collect::<AppResult<Vec<_>>>()?;
        let by_work_type = by_work_type
            .into_iter()
            .map(|(work_type, count)| work_type.parse::<WorkType>().map(|w| (w, count)))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(JobStats::from_counts(by_status, by_work_type, monthly))
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("engineer"), "engineer");
    }

    #[test]
    fn test_row_with_unknown_status_is_rejected() {
        let row = JobRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            company: "Acme".into(),
            position: "Engineer".into(),
            work_location: "Remote".into(),
            work_type: "full-time".into(),
            status: "ghosted".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(matches!(Job::try_from(row), Err(AppError::Internal(_))));
    }

    fn select_prefix() -> String {
        format!("SELECT {JOB_COLUMNS} FROM jobs WHERE owner_id = $1")
    }

    #[test]
    fn test_list_query_without_filters() {
        let query = list_query(Uuid::new_v4(), &JobFilter::default());
        assert_eq!(
            query.sql(),
            format!("{} ORDER BY created_at DESC", select_prefix())
        );
    }

    #[test]
    fn test_list_query_all_adds_no_predicate() {
        let filter: JobFilter =
            serde_json::from_str(r#"{"status":"all","workType":"all","search":"  "}"#).unwrap();
        let query = list_query(Uuid::new_v4(), &filter);
        assert!(!query.sql().contains(" AND "));
    }

    #[test]
    fn test_list_query_with_filters() {
        let filter = JobFilter {
            status: Some(JobStatus::Interview),
            work_type: Some(WorkType::PartTime),
            search: Some("rust".to_string()),
            sort: Some(SortOrder::PositionAsc),
        };
        let query = list_query(Uuid::new_v4(), &filter);
        assert_eq!(
            query.sql(),
            format!(
                "{} AND status = $2 AND work_type = $3 AND position ILIKE $4 ORDER BY lower(position) ASC",
                select_prefix()
            )
        );
    }

    #[test]
    fn test_update_query_sets_only_changed_columns() {
        let query = update_query(Uuid::new_v4(), Uuid::new_v4(), JobChanges::status(JobStatus::Reject));
        assert_eq!(
            query.sql(),
            format!(
                "UPDATE jobs SET updated_at = NOW(), status = $1 WHERE id = $2 AND owner_id = $3 RETURNING {JOB_COLUMNS}"
            )
        );

        let changes = JobChanges {
            company: Some("Globex".to_string()),
            work_location: Some("Berlin".to_string()),
            ..Default::default()
        };
        let query = update_query(Uuid::new_v4(), Uuid::new_v4(), changes);
        assert_eq!(
            query.sql(),
            format!(
                "UPDATE jobs SET updated_at = NOW(), company = $1, work_location = $2 WHERE id = $3 AND owner_id = $4 RETURNING {JOB_COLUMNS}"
            )
        );
    }

    #[test]
    fn test_delete_and_stats_are_owner_scoped() {
        assert!(DELETE_SQL.ends_with("WHERE id = $1 AND owner_id = $2"));
        for sql in [STATUS_COUNTS_SQL, WORK_TYPE_COUNTS_SQL, MONTHLY_COUNTS_SQL] {
            assert!(sql.contains("WHERE owner_id = $1"), "{sql}");
            assert!(sql.contains("GROUP BY"), "{sql}");
        }
        assert!(MONTHLY_COUNTS_SQL.contains("LIMIT 6"));
    }
}
