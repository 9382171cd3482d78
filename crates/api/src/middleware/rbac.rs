//! Admin gate for write operations.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jobly_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an admin token. Rejects with 401 Unauthorized otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            tracing::debug!(username = %user.username, "Rejected non-admin write");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Admin privileges required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
