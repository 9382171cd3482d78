//! Response envelope types for the `/jobs` resource.
//!
//! Single jobs are wrapped as `{ "job": ... }`, listings as
//! `{ "jobs": [...] }`, and deletions answer `{ "deleted": "<message>" }`.

use jobly_db::models::job::Job;
use serde::Serialize;

/// `{ "job": Job }` envelope.
#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub job: Job,
}

/// `{ "jobs": [Job] }` envelope.
#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
}

/// `{ "deleted": "..." }` confirmation.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: String,
}
