pub mod jobs;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// ```text
/// /jobs              list, create (create: admin)
/// /jobs/{id}         get, update, delete (update/delete: admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/jobs", jobs::router())
}
