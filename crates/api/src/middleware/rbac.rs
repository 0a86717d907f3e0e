//! Superuser gate for the administration endpoints.
//!
//! Model-level permissions are checked in the service layer (see
//! [`crate::services::authz`]); this extractor covers the routes that have
//! no model permission and are reserved for superusers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use workbound_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a superuser. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireSuperuser(user): RequireSuperuser) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireSuperuser(pub AuthUser);

impl FromRequestParts<AppState> for RequireSuperuser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_superuser {
            return Err(AppError::Core(CoreError::permission_denied()));
        }
        Ok(RequireSuperuser(user))
    }
}
