//! Portfolio operations.

use validator::Validate;
use workbound_core::filters::Page;
use workbound_core::permissions::{Action, ModelKind};
use workbound_core::types::DbId;
use workbound_db::models::portfolio::{
    CreatePortfolio, Portfolio, PortfolioDetail, PortfolioFilter, UpdatePortfolio,
};
use workbound_db::repositories::{PortfolioRepo, SectionRepo};

use super::authz::authorize;
use super::not_found;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const ENTITY: &str = "Portfolio";

pub async fn create(
    state: &AppState,
    actor: &AuthUser,
    input: &CreatePortfolio,
) -> AppResult<Portfolio> {
    authorize(&state.pool, actor, Action::Add, ModelKind::Portfolio).await?;
    input.validate()?;
    let portfolio = PortfolioRepo::create(&state.pool, actor.user_id, input).await?;
    tracing::info!(
        portfolio_id = portfolio.id,
        public_id = %portfolio.public_id,
        user_id = actor.user_id,
        "Portfolio created"
    );
    Ok(portfolio)
}

pub async fn list(
    state: &AppState,
    actor: &AuthUser,
    filter: &PortfolioFilter,
    page: Page,
) -> AppResult<Vec<Portfolio>> {
    authorize(&state.pool, actor, Action::View, ModelKind::Portfolio).await?;
    Ok(PortfolioRepo::list(&state.pool, filter, page).await?)
}

pub async fn find(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<Portfolio> {
    authorize(&state.pool, actor, Action::View, ModelKind::Portfolio).await?;
    PortfolioRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

/// A portfolio with its sections in display order.
pub async fn detail(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<PortfolioDetail> {
    let portfolio = find(state, actor, id).await?;
    let sections = SectionRepo::list_for_portfolio(&state.pool, id).await?;
    Ok(PortfolioDetail {
        portfolio,
        sections,
    })
}

pub async fn update(
    state: &AppState,
    actor: &AuthUser,
    id: DbId,
    input: &UpdatePortfolio,
) -> AppResult<Portfolio> {
    authorize(&state.pool, actor, Action::Change, ModelKind::Portfolio).await?;
    input.validate()?;
    PortfolioRepo::update(&state.pool, id, input)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

/// Hard delete; sections and work items cascade.
pub async fn delete(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<()> {
    authorize(&state.pool, actor, Action::Delete, ModelKind::Portfolio).await?;
    if PortfolioRepo::delete(&state.pool, id).await? {
        tracing::info!(portfolio_id = id, user_id = actor.user_id, "Portfolio deleted");
        Ok(())
    } else {
        Err(not_found(ENTITY, id))
    }
}
