//! Role assignments and the role-type lookup.

use validator::Validate;
use workbound_core::filters::Page;
use workbound_core::permissions::{Action, ModelKind};
use workbound_core::types::DbId;
use workbound_db::models::role::{CreateRole, Role, RoleDetail, RoleType, UpdateRole};
use workbound_db::repositories::{RoleRepo, RoleTypeRepo};

use super::authz::authorize;
use super::not_found;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const ENTITY: &str = "Role";

/// Grant a role. A duplicate (user, category, role type) triple is a 409.
pub async fn create(state: &AppState, actor: &AuthUser, input: &CreateRole) -> AppResult<Role> {
    authorize(&state.pool, actor, Action::Add, ModelKind::Role).await?;
    input.validate()?;
    let role = RoleRepo::create(&state.pool, input).await?;
    tracing::info!(
        role_id = role.id,
        user_id = role.user_id,
        category_id = role.category_id,
        role_type_id = role.role_type_id,
        "Role granted"
    );
    Ok(role)
}

pub async fn list(
    state: &AppState,
    actor: &AuthUser,
    category_id: Option<DbId>,
    page: Page,
) -> AppResult<Vec<Role>> {
    authorize(&state.pool, actor, Action::View, ModelKind::Role).await?;
    Ok(RoleRepo::list(&state.pool, category_id, page).await?)
}

pub async fn find(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<Role> {
    authorize(&state.pool, actor, Action::View, ModelKind::Role).await?;
    RoleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

pub async fn update(
    state: &AppState,
    actor: &AuthUser,
    id: DbId,
    input: &UpdateRole,
) -> AppResult<Role> {
    authorize(&state.pool, actor, Action::Change, ModelKind::Role).await?;
    input.validate()?;
    RoleRepo::update(&state.pool, id, input)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

pub async fn delete(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<()> {
    authorize(&state.pool, actor, Action::Delete, ModelKind::Role).await?;
    if RoleRepo::delete(&state.pool, id).await? {
        tracing::info!(role_id = id, user_id = actor.user_id, "Role revoked");
        Ok(())
    } else {
        Err(not_found(ENTITY, id))
    }
}

/// The caller's own roles with category and role type details.
pub async fn mine(state: &AppState, actor: &AuthUser) -> AppResult<Vec<RoleDetail>> {
    Ok(RoleRepo::list_details_for_user(&state.pool, actor.user_id).await?)
}

/// All role types, lowest level first.
pub async fn role_types(state: &AppState) -> AppResult<Vec<RoleType>> {
    Ok(RoleTypeRepo::list(&state.pool).await?)
}
