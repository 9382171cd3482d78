//! Job entity model, DTOs, and search filters.

use jobly_core::error::CoreError;
use jobly_core::sql::{sql_for_partial_update, ColumnMap, PartialUpdate};
use jobly_core::types::DbId;
use jobly_core::validation::validate_equity;
use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Update fields whose API name differs from the `jobs` column name.
pub const JOB_COLUMNS: ColumnMap = ColumnMap::new(&[("companyHandle", "company_handle")]);

/// A row from the `jobs` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: DbId,
    pub title: String,
    pub salary: Option<i32>,
    /// Serialized as a decimal string (e.g. `"0.5"`).
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// DTO for creating a new job via `POST /jobs`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJob {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<Decimal>,
    #[serde(alias = "company_handle")]
    #[validate(length(min = 1, max = 25))]
    pub company_handle: String,
}

/// DTO for `PATCH /jobs/{id}`. Only present fields are written.
///
/// The owning company and the id are immutable, so any other key is
/// rejected at deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateJob {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<Decimal>,
}

/// Typed value bound to a job update placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum JobValue {
    Text(String),
    Int(i32),
    Decimal(Decimal),
}

impl UpdateJob {
    /// Present fields as ordered `(field, value)` pairs.
    pub fn changes(&self) -> Vec<(&'static str, JobValue)> {
        let mut changes = Vec::new();
        if let Some(ref title) = self.title {
            changes.push(("title", JobValue::Text(title.clone())));
        }
        if let Some(salary) = self.salary {
            changes.push(("salary", JobValue::Int(salary)));
        }
        if let Some(equity) = self.equity {
            changes.push(("equity", JobValue::Decimal(equity)));
        }
        changes
    }

    /// Render the `SET` fragment for this update.
    ///
    /// Fails with [`CoreError::Validation`] when no field is present.
    pub fn to_partial_update(&self) -> Result<PartialUpdate<JobValue>, CoreError> {
        sql_for_partial_update(self.changes(), &JOB_COLUMNS)
    }
}

/// Query parameters for `GET /jobs` (`?title=&minSalary=&hasEquity=`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchQuery {
    pub title: Option<String>,
    /// `minSalary=` (blank) is treated the same as an absent parameter.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_salary: Option<i32>,
    /// Presence flag: any non-empty value, `false` included, enables the
    /// positive-equity predicate.
    pub has_equity: Option<String>,
}

/// Normalized search filters used by [`crate::repositories::JobRepo::list`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Strict lower bound on salary.
    pub min_salary: Option<i32>,
    /// Only jobs with `equity > 0`.
    pub has_equity: bool,
}

impl JobFilter {
    /// `true` when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.min_salary.is_none() && !self.has_equity
    }
}

/// Parse an optional query value, mapping a blank string to `None`.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl From<JobSearchQuery> for JobFilter {
    fn from(query: JobSearchQuery) -> Self {
        Self {
            title: query.title.filter(|t| !t.is_empty()),
            min_salary: query.min_salary,
            has_equity: query.has_equity.is_some_and(|v| !v.is_empty()),
        }
    }
}
