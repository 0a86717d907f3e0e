//! Handlers for the `/portfolios` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use workbound_core::types::DbId;
use workbound_db::models::portfolio::{
    CreatePortfolio, Portfolio, PortfolioDetail, PortfolioFilter, UpdatePortfolio,
};
use workbound_db::models::section::Section;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::services::{portfolios, sections};
use crate::state::AppState;

/// POST /api/v1/portfolios
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreatePortfolio>,
) -> AppResult<(StatusCode, Json<Portfolio>)> {
    let portfolio = portfolios::create(&state, &user, &input).await?;
    Ok((StatusCode::CREATED, Json(portfolio)))
}

/// GET /api/v1/portfolios
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
    Query(filter): Query<PortfolioFilter>,
) -> AppResult<Json<DataResponse<Vec<Portfolio>>>> {
    let items = portfolios::list(&state, &user, &filter, params.page()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/portfolios/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<PortfolioDetail>> {
    Ok(Json(portfolios::detail(&state, &user, id).await?))
}

/// PUT|PATCH /api/v1/portfolios/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePortfolio>,
) -> AppResult<Json<Portfolio>> {
    Ok(Json(portfolios::update(&state, &user, id, &input).await?))
}

/// DELETE /api/v1/portfolios/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    portfolios::delete(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/portfolios/{id}/sections/renumber
pub async fn renumber_sections(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Section>>>> {
    let items = sections::renumber(&state, &user, id).await?;
    Ok(Json(DataResponse { data: items }))
}
