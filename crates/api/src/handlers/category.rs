//! Handlers for the `/categories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use workbound_core::types::DbId;
use workbound_db::models::category::{Category, CreateCategory, TemplateFilter, UpdateCategory};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::services::categories;
use crate::state::AppState;

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = categories::create(&state, &user, &input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/categories
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
    Query(filter): Query<TemplateFilter>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let items = categories::list(&state, &user, &filter, params.page()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    Ok(Json(categories::find(&state, &user, id).await?))
}

/// PUT|PATCH /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    Ok(Json(categories::update(&state, &user, id, &input).await?))
}

/// DELETE /api/v1/categories/{id}
///
/// Archives the category; it stays referenced by existing sections and roles.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    categories::archive(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
