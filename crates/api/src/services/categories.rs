//! Category template operations. Deleting a category archives it.

use validator::Validate;
use workbound_core::filters::Page;
use workbound_core::permissions::{Action, ModelKind};
use workbound_core::types::DbId;
use workbound_db::models::category::{Category, CreateCategory, TemplateFilter, UpdateCategory};
use workbound_db::repositories::CategoryRepo;

use super::authz::authorize;
use super::not_found;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const ENTITY: &str = "Category";

pub async fn create(
    state: &AppState,
    actor: &AuthUser,
    input: &CreateCategory,
) -> AppResult<Category> {
    authorize(&state.pool, actor, Action::Add, ModelKind::Category).await?;
    input.validate()?;
    let category = CategoryRepo::create(&state.pool, actor.user_id, input).await?;
    tracing::info!(category_id = category.id, title = %category.title, "Category created");
    Ok(category)
}

pub async fn list(
    state: &AppState,
    actor: &AuthUser,
    filter: &TemplateFilter,
    page: Page,
) -> AppResult<Vec<Category>> {
    authorize(&state.pool, actor, Action::View, ModelKind::Category).await?;
    Ok(CategoryRepo::list(&state.pool, filter, page).await?)
}

pub async fn find(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<Category> {
    authorize(&state.pool, actor, Action::View, ModelKind::Category).await?;
    CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

pub async fn update(
    state: &AppState,
    actor: &AuthUser,
    id: DbId,
    input: &UpdateCategory,
) -> AppResult<Category> {
    authorize(&state.pool, actor, Action::Change, ModelKind::Category).await?;
    input.validate()?;
    CategoryRepo::update(&state.pool, id, input)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

pub async fn archive(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<()> {
    authorize(&state.pool, actor, Action::Delete, ModelKind::Category).await?;
    if CategoryRepo::archive(&state.pool, id).await? {
        tracing::info!(category_id = id, user_id = actor.user_id, "Category archived");
        Ok(())
    } else {
        Err(not_found(ENTITY, id))
    }
}
