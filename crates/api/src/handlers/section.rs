//! Handlers for the `/sections` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use workbound_core::types::DbId;
use workbound_db::models::section::{CreateSection, Section, SectionFilter, UpdateSection};
use workbound_db::models::work_item::WorkItem;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::services::{sections, work_items, MoveRequest};
use crate::state::AppState;

/// POST /api/v1/sections
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateSection>,
) -> AppResult<(StatusCode, Json<Section>)> {
    let section = sections::create(&state, &user, &input).await?;
    Ok((StatusCode::CREATED, Json(section)))
}

/// GET /api/v1/sections
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
    Query(filter): Query<SectionFilter>,
) -> AppResult<Json<DataResponse<Vec<Section>>>> {
    let items = sections::list(&state, &user, &filter, params.page()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/sections/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Section>> {
    Ok(Json(sections::find(&state, &user, id).await?))
}

/// PUT|PATCH /api/v1/sections/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSection>,
) -> AppResult<Json<Section>> {
    Ok(Json(sections::update(&state, &user, id, &input).await?))
}

/// DELETE /api/v1/sections/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    sections::delete(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sections/{id}/move
pub async fn move_after(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<MoveRequest>,
) -> AppResult<Json<Section>> {
    Ok(Json(sections::move_after(&state, &user, id, &input).await?))
}

/// POST /api/v1/sections/{id}/work-items/renumber
pub async fn renumber_work_items(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<WorkItem>>>> {
    let items = work_items::renumber(&state, &user, id).await?;
    Ok(Json(DataResponse { data: items }))
}
