//! Handlers for the `/work-items` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use workbound_core::types::DbId;
use workbound_db::models::work_item::{CreateWorkItem, UpdateWorkItem, WorkItem, WorkItemFilter};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::services::{work_items, MoveRequest};
use crate::state::AppState;

/// POST /api/v1/work-items
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateWorkItem>,
) -> AppResult<(StatusCode, Json<WorkItem>)> {
    let item = work_items::create(&state, &user, &input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/work-items
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
    Query(filter): Query<WorkItemFilter>,
) -> AppResult<Json<DataResponse<Vec<WorkItem>>>> {
    let items = work_items::list(&state, &user, &filter, params.page()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/work-items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WorkItem>> {
    Ok(Json(work_items::find(&state, &user, id).await?))
}

/// PUT|PATCH /api/v1/work-items/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWorkItem>,
) -> AppResult<Json<WorkItem>> {
    Ok(Json(work_items::update(&state, &user, id, &input).await?))
}

/// DELETE /api/v1/work-items/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    work_items::delete(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/work-items/{id}/move
pub async fn move_after(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<MoveRequest>,
) -> AppResult<Json<WorkItem>> {
    Ok(Json(work_items::move_after(&state, &user, id, &input).await?))
}
