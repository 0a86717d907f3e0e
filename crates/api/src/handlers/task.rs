//! Handlers for the `/tasks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use workbound_core::types::DbId;
use workbound_db::models::category::TemplateFilter;
use workbound_db::models::task::{CreateTask, Task, UpdateTask};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::services::tasks;
use crate::state::AppState;

/// POST /api/v1/tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let task = tasks::create(&state, &user, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
    Query(filter): Query<TemplateFilter>,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    let items = tasks::list(&state, &user, &filter, params.page()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    Ok(Json(tasks::find(&state, &user, id).await?))
}

/// PUT|PATCH /api/v1/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    Ok(Json(tasks::update(&state, &user, id, &input).await?))
}

/// DELETE /api/v1/tasks/{id} (archives)
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    tasks::archive(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
