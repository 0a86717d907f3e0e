//! Section operations, including sibling reordering.

use validator::Validate;
use workbound_core::error::CoreError;
use workbound_core::filters::Page;
use workbound_core::ordering::{neighbours, order_between};
use workbound_core::permissions::{Action, ModelKind};
use workbound_core::types::DbId;
use workbound_db::models::section::{CreateSection, Section, SectionFilter, UpdateSection};
use workbound_db::repositories::{PortfolioRepo, SectionRepo};

use super::authz::authorize;
use super::{not_found, MoveRequest};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const ENTITY: &str = "Section";

pub async fn create(
    state: &AppState,
    actor: &AuthUser,
    input: &CreateSection,
) -> AppResult<Section> {
    authorize(&state.pool, actor, Action::Add, ModelKind::Section).await?;
    input.validate()?;
    let section = SectionRepo::create(&state.pool, actor.user_id, input).await?;
    tracing::info!(
        section_id = section.id,
        portfolio_id = section.portfolio_id,
        sort_order = section.sort_order,
        "Section created"
    );
    Ok(section)
}

pub async fn list(
    state: &AppState,
    actor: &AuthUser,
    filter: &SectionFilter,
    page: Page,
) -> AppResult<Vec<Section>> {
    authorize(&state.pool, actor, Action::View, ModelKind::Section).await?;
    Ok(SectionRepo::list(&state.pool, filter, page).await?)
}

/// Sections of one portfolio in display order.
pub async fn list_for_portfolio(
    state: &AppState,
    actor: &AuthUser,
    portfolio_id: DbId,
) -> AppResult<Vec<Section>> {
    authorize(&state.pool, actor, Action::View, ModelKind::Section).await?;
    Ok(SectionRepo::list_for_portfolio(&state.pool, portfolio_id).await?)
}

pub async fn find(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<Section> {
    authorize(&state.pool, actor, Action::View, ModelKind::Section).await?;
    SectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

pub async fn update(
    state: &AppState,
    actor: &AuthUser,
    id: DbId,
    input: &UpdateSection,
) -> AppResult<Section> {
    authorize(&state.pool, actor, Action::Change, ModelKind::Section).await?;
    input.validate()?;
    SectionRepo::update(&state.pool, id, input)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

pub async fn delete(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<()> {
    authorize(&state.pool, actor, Action::Delete, ModelKind::Section).await?;
    if SectionRepo::delete(&state.pool, id).await? {
        tracing::info!(section_id = id, user_id = actor.user_id, "Section deleted");
        Ok(())
    } else {
        Err(not_found(ENTITY, id))
    }
}

/// Rewrite a portfolio's section orders to 0.1, 0.2, ... in current sequence.
pub async fn renumber(
    state: &AppState,
    actor: &AuthUser,
    portfolio_id: DbId,
) -> AppResult<Vec<Section>> {
    authorize(&state.pool, actor, Action::Change, ModelKind::Section).await?;
    if PortfolioRepo::find_by_id(&state.pool, portfolio_id).await?.is_none() {
        return Err(not_found("Portfolio", portfolio_id));
    }
    let sections = SectionRepo::renumber(&state.pool, portfolio_id).await?;
    tracing::info!(portfolio_id, count = sections.len(), "Sections renumbered");
    Ok(sections)
}

/// Move a section directly after a sibling (or to the front), renumbering
/// the siblings first when the gap is too narrow to split.
pub async fn move_after(
    state: &AppState,
    actor: &AuthUser,
    id: DbId,
    request: &MoveRequest,
) -> AppResult<Section> {
    authorize(&state.pool, actor, Action::Change, ModelKind::Section).await?;
    let section = SectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))?;

    let mut order = slot(state, &section, request).await?;
    if order.is_none() {
        SectionRepo::renumber(&state.pool, section.portfolio_id).await?;
        order = slot(state, &section, request).await?;
    }
    let sort_order = order.ok_or_else(|| {
        AppError::InternalError(format!("No order slot for section {id} after renumbering"))
    })?;

    let update = UpdateSection {
        sort_order: Some(sort_order),
        ..Default::default()
    };
    SectionRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

async fn slot(
    state: &AppState,
    section: &Section,
    request: &MoveRequest,
) -> AppResult<Option<f64>> {
    let siblings: Vec<(DbId, f64)> =
        SectionRepo::list_for_portfolio(&state.pool, section.portfolio_id)
            .await?
            .into_iter()
            .map(|s| (s.id, s.sort_order))
            .collect();
    let (before, after) = neighbours(&siblings, section.id, request.after_id).ok_or_else(|| {
        CoreError::field("after_id", "Must be another section of the same portfolio")
    })?;
    Ok(order_between(before, after))
}
