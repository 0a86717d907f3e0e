//! Handlers for `/roles` and `/role-types`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use workbound_core::types::DbId;
use workbound_db::models::role::{CreateRole, Role, RoleDetail, RoleType, UpdateRole};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::{PageParams, RoleListParams};
use crate::response::DataResponse;
use crate::services::roles;
use crate::state::AppState;

/// POST /api/v1/roles
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateRole>,
) -> AppResult<(StatusCode, Json<Role>)> {
    let role = roles::create(&state, &user, &input).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// GET /api/v1/roles
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
    Query(filter): Query<RoleListParams>,
) -> AppResult<Json<DataResponse<Vec<Role>>>> {
    let items = roles::list(&state, &user, filter.category_id, params.page()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/roles/mine
pub async fn mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<RoleDetail>>>> {
    let items = roles::mine(&state, &user).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/roles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Role>> {
    Ok(Json(roles::find(&state, &user, id).await?))
}

/// PUT|PATCH /api/v1/roles/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRole>,
) -> AppResult<Json<Role>> {
    Ok(Json(roles::update(&state, &user, id, &input).await?))
}

/// DELETE /api/v1/roles/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    roles::delete(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/role-types
pub async fn list_role_types(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<RoleType>>>> {
    let items = roles::role_types(&state).await?;
    Ok(Json(DataResponse { data: items }))
}
