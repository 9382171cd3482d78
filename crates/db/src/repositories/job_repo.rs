//! Repository for the `jobs` table.

use jobly_core::sql::PartialUpdate;
use jobly_core::types::DbId;
use sqlx::PgPool;

use crate::models::job::{CreateJob, Job, JobFilter, JobValue};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, salary, equity, company_handle";

/// Provides CRUD and search operations for jobs.
pub struct JobRepo;

impl JobRepo {
    /// Insert a new job, returning the created row.
    ///
    /// A concurrent insert of the same `(title, company_handle)` surfaces as a
    /// unique violation on `uq_jobs_title_company`.
    pub async fn create(pool: &PgPool, input: &CreateJob) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(&input.title)
            .bind(input.salary)
            .bind(input.equity)
            .bind(&input.company_handle)
            .fetch_one(pool)
            .await
    }

    /// Find a job by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the job with exactly this title at this company, if any.
    pub async fn find_by_title_and_company(
        pool: &PgPool,
        title: &str,
        company_handle: &str,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE title = $1 AND company_handle = $2");
        sqlx::query_as::<_, Job>(&query)
            .bind(title)
            .bind(company_handle)
            .fetch_optional(pool)
            .await
    }

    /// List jobs matching every active predicate in `filter`.
    ///
    /// Rows come back in storage order; an empty vector means nothing matched.
    pub async fn list(pool: &PgPool, filter: &JobFilter) -> Result<Vec<Job>, sqlx::Error> {
        let (where_clause, bind_values) = build_job_filter(filter);
        let query = format!("SELECT {COLUMNS} FROM jobs {where_clause}");
        tracing::debug!(%where_clause, "Listing jobs");

        let mut q = sqlx::query_as::<_, Job>(&query);
        for val in &bind_values {
            match val {
                FilterValue::Text(v) => q = q.bind(v.as_str()),
                FilterValue::Int(v) => q = q.bind(*v),
            }
        }
        q.fetch_all(pool).await
    }

    /// Apply a rendered partial update to the job with the given id.
    ///
    /// The id is bound after the update values. Returns `None` if no row
    /// with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &PartialUpdate<JobValue>,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {COLUMNS}",
            changes.set_cols,
            changes.next_param(),
        );

        let mut q = sqlx::query_as::<_, Job>(&query);
        for val in &changes.values {
            match val {
                JobValue::Text(v) => q = q.bind(v.as_str()),
                JobValue::Int(v) => q = q.bind(*v),
                JobValue::Decimal(v) => q = q.bind(*v),
            }
        }
        q.bind(id).fetch_optional(pool).await
    }

    /// Permanently delete a job, returning the removed row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("DELETE FROM jobs WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for the job search query.
#[derive(Debug, PartialEq)]
enum FilterValue {
    Text(String),
    Int(i32),
}

/// Build a WHERE clause and bind values from the active job filters.
///
/// Predicates are ANDed in a fixed order (title, salary, equity). The clause
/// is empty when no filter is active, otherwise it starts with `WHERE `.
fn build_job_filter(filter: &JobFilter) -> (String, Vec<FilterValue>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<FilterValue> = Vec::new();

    if let Some(ref title) = filter.title {
        conditions.push(format!("title ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(FilterValue::Text(format!("%{}%", escape_like(title))));
    }

    if let Some(min_salary) = filter.min_salary {
        conditions.push(format!("salary > ${bind_idx}"));
        bind_values.push(FilterValue::Int(min_salary));
    }

    if filter.has_equity {
        conditions.push("equity > 0".to_string());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}

/// Escape `LIKE` metacharacters so `value` matches literally. Backslash is
/// PostgreSQL's default `LIKE` escape character.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(title: Option<&str>, min_salary: Option<i32>, has_equity: bool) -> JobFilter {
        JobFilter {
            title: title.map(str::to_string),
            min_salary,
            has_equity,
        }
    }

    #[test]
    fn renders_each_filter_combination() {
        let cases = [
            (filter(None, None, false), ""),
            (filter(Some("j"), None, false), "WHERE title ILIKE $1"),
            (
                filter(Some("j"), Some(10), false),
                "WHERE title ILIKE $1 AND salary > $2",
            ),
            (
                filter(Some("j"), None, true),
                "WHERE title ILIKE $1 AND equity > 0",
            ),
            (filter(None, Some(10), false), "WHERE salary > $1"),
            (filter(None, None, true), "WHERE equity > 0"),
            (
                filter(None, Some(10), true),
                "WHERE salary > $1 AND equity > 0",
            ),
            (
                filter(Some("j"), Some(10), true),
                "WHERE title ILIKE $1 AND salary > $2 AND equity > 0",
            ),
        ];

        for (input, expected) in cases {
            let (where_clause, _) = build_job_filter(&input);
            assert_eq!(where_clause, expected, "filter: {input:?}");
        }
    }

    #[test]
    fn binds_title_pattern_then_salary() {
        let (_, values) = build_job_filter(&filter(Some("eng"), Some(500), true));
        assert_eq!(
            values,
            vec![FilterValue::Text("%eng%".into()), FilterValue::Int(500)]
        );
    }

    #[test]
    fn title_pattern_escapes_like_metacharacters() {
        assert_eq!(escape_like("100%_off\\"), "100\\%\\_off\\\\");

        let (_, values) = build_job_filter(&filter(Some("_"), None, false));
        assert_eq!(values, vec![FilterValue::Text("%\\_%".into())]);
    }
}
