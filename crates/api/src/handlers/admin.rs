//! Superuser-only permission administration.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use workbound_core::types::DbId;
use workbound_db::models::permission::PermissionEntry;

use crate::error::AppResult;
use crate::middleware::rbac::RequireSuperuser;
use crate::response::DataResponse;
use crate::services::permissions;
use crate::state::AppState;

/// Body of a permission grant.
#[derive(Debug, Deserialize)]
pub struct GrantPermission {
    pub codename: String,
}

/// GET /api/v1/admin/users/{id}/permissions
pub async fn list_permissions(
    State(state): State<AppState>,
    RequireSuperuser(_admin): RequireSuperuser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PermissionEntry>>>> {
    let data = permissions::list_for_user(&state, user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/admin/users/{id}/permissions
pub async fn grant_permission(
    State(state): State<AppState>,
    RequireSuperuser(admin): RequireSuperuser,
    Path(user_id): Path<DbId>,
    Json(input): Json<GrantPermission>,
) -> AppResult<(StatusCode, Json<PermissionEntry>)> {
    let entry = permissions::grant(&state, &admin, user_id, &input.codename).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/v1/admin/users/{id}/permissions/{codename}
pub async fn revoke_permission(
    State(state): State<AppState>,
    RequireSuperuser(admin): RequireSuperuser,
    Path((user_id, codename)): Path<(DbId, String)>,
) -> AppResult<StatusCode> {
    permissions::revoke(&state, &admin, user_id, &codename).await?;
    Ok(StatusCode::NO_CONTENT)
}
