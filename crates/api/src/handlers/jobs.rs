//! Handlers for the `/jobs` resource.
//!
//! Reads are public; create, update, and delete require an admin token.

use axum::extract::State;
use axum::Json;
use jobly_core::error::CoreError;
use jobly_core::types::DbId;
use jobly_db::models::job::{CreateJob, Job, JobFilter, JobSearchQuery, UpdateJob};
use jobly_db::repositories::JobRepo;
use jobly_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{PathParam, QueryParams, ValidJson};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DeletedResponse, JobResponse, JobsResponse};
use crate::state::AppState;

/// POST /jobs
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidJson(input): ValidJson<CreateJob>,
) -> AppResult<Json<JobResponse>> {
    // Advisory check for a readable message; `uq_jobs_title_company` still
    // guards against a concurrent insert slipping in between.
    let existing =
        JobRepo::find_by_title_and_company(&state.pool, &input.title, &input.company_handle)
            .await?;
    if existing.is_some() {
        return Err(AppError::Core(CoreError::Duplicate(format!(
            "Duplicate job exists: {} at {}",
            input.title, input.company_handle
        ))));
    }

    let job = JobRepo::create(&state.pool, &input).await?;
    tracing::info!(job_id = job.id, admin = %admin.username, "Job created");
    Ok(Json(JobResponse { job }))
}

/// GET /jobs?title=&minSalary=&hasEquity=
pub async fn list(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<JobSearchQuery>,
) -> AppResult<Json<JobsResponse>> {
    let filter = JobFilter::from(query);
    let jobs = find_all(&state.pool, &filter).await?;
    Ok(Json(JobsResponse { jobs }))
}

/// GET /jobs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<JobResponse>> {
    let job = JobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Job", id }))?;
    Ok(Json(JobResponse { job }))
}

/// PATCH /jobs/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    PathParam(id): PathParam<DbId>,
    ValidJson(input): ValidJson<UpdateJob>,
) -> AppResult<Json<JobResponse>> {
    let changes = input.to_partial_update()?;
    let job = JobRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Job", id }))?;
    tracing::info!(job_id = id, admin = %admin.username, "Job updated");
    Ok(Json(JobResponse { job }))
}

/// DELETE /jobs/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<DeletedResponse>> {
    let job = JobRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Job", id }))?;
    tracing::info!(job_id = job.id, admin = %admin.username, "Job deleted");
    Ok(Json(DeletedResponse {
        deleted: format!("Deleted job with id: {id}"),
    }))
}

/// Run a job search.
///
/// When at least one filter is active and nothing matched, this fails with
/// [`CoreError::NoMatch`] instead of returning an empty list. An unfiltered
/// search over an empty table is still a success.
async fn find_all(pool: &DbPool, filter: &JobFilter) -> AppResult<Vec<Job>> {
    let jobs = JobRepo::list(pool, filter).await?;
    if jobs.is_empty() && !filter.is_empty() {
        return Err(AppError::Core(CoreError::NoMatch(
            "No jobs fit those parameters".into(),
        )));
    }
    Ok(jobs)
}
