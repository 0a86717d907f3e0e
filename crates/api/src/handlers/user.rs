//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use workbound_core::types::DbId;
use workbound_db::models::user::{RegisterUser, UpdateUserRequest, UserResponse};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::{PageParams, UserListParams};
use crate::response::DataResponse;
use crate::services::users;
use crate::state::AppState;

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let created = users::create(&state, &user, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
    Query(filter): Query<UserListParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let items = users::list(&state, &user, filter.email.as_deref(), params.page()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(users::find(&state, &user, id).await?))
}

/// PUT|PATCH /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(users::update(&state, &user, id, &input).await?))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    users::delete(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
