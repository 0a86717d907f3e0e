//! Work item operations.
//!
//! Changing or deleting a work item needs the model permission and then the
//! object rule in [`authorize_work_item`].

use validator::Validate;
use workbound_core::error::CoreError;
use workbound_core::filters::Page;
use workbound_core::ordering::{neighbours, order_between};
use workbound_core::permissions::{Action, ModelKind};
use workbound_core::types::DbId;
use workbound_db::models::work_item::{CreateWorkItem, UpdateWorkItem, WorkItem, WorkItemFilter};
use workbound_db::repositories::{SectionRepo, WorkItemRepo};

use super::authz::{authorize, authorize_work_item};
use super::{not_found, MoveRequest};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const ENTITY: &str = "WorkItem";

pub async fn create(
    state: &AppState,
    actor: &AuthUser,
    input: &CreateWorkItem,
) -> AppResult<WorkItem> {
    authorize(&state.pool, actor, Action::Add, ModelKind::WorkItem).await?;
    input.validate()?;
    let item = WorkItemRepo::create(&state.pool, actor.user_id, input).await?;
    tracing::info!(
        work_item_id = item.id,
        section_id = item.section_id,
        sort_order = item.sort_order,
        "Work item created"
    );
    Ok(item)
}

pub async fn list(
    state: &AppState,
    actor: &AuthUser,
    filter: &WorkItemFilter,
    page: Page,
) -> AppResult<Vec<WorkItem>> {
    authorize(&state.pool, actor, Action::View, ModelKind::WorkItem).await?;
    Ok(WorkItemRepo::list(&state.pool, filter, page).await?)
}

/// Work items of one section in display order.
pub async fn list_for_section(
    state: &AppState,
    actor: &AuthUser,
    section_id: DbId,
) -> AppResult<Vec<WorkItem>> {
    authorize(&state.pool, actor, Action::View, ModelKind::WorkItem).await?;
    Ok(WorkItemRepo::list_for_section(&state.pool, section_id).await?)
}

pub async fn find(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<WorkItem> {
    authorize(&state.pool, actor, Action::View, ModelKind::WorkItem).await?;
    WorkItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

/// Load a work item the actor may mutate under `action`.
async fn find_mutable(
    state: &AppState,
    actor: &AuthUser,
    id: DbId,
    action: Action,
) -> AppResult<WorkItem> {
    authorize(&state.pool, actor, action, ModelKind::WorkItem).await?;
    let item = WorkItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))?;
    authorize_work_item(&state.pool, actor, &item).await?;
    Ok(item)
}

pub async fn update(
    state: &AppState,
    actor: &AuthUser,
    id: DbId,
    input: &UpdateWorkItem,
) -> AppResult<WorkItem> {
    find_mutable(state, actor, id, Action::Change).await?;
    input.validate()?;
    WorkItemRepo::update(&state.pool, id, input)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

pub async fn delete(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<()> {
    find_mutable(state, actor, id, Action::Delete).await?;
    if WorkItemRepo::delete(&state.pool, id).await? {
        tracing::info!(work_item_id = id, user_id = actor.user_id, "Work item deleted");
        Ok(())
    } else {
        Err(not_found(ENTITY, id))
    }
}

/// Rewrite a section's work item orders to 0.1, 0.2, ... in current sequence.
pub async fn renumber(
    state: &AppState,
    actor: &AuthUser,
    section_id: DbId,
) -> AppResult<Vec<WorkItem>> {
    authorize(&state.pool, actor, Action::Change, ModelKind::WorkItem).await?;
    if SectionRepo::find_by_id(&state.pool, section_id).await?.is_none() {
        return Err(not_found("Section", section_id));
    }
    let items = WorkItemRepo::renumber(&state.pool, section_id).await?;
    tracing::info!(section_id, count = items.len(), "Work items renumbered");
    Ok(items)
}

/// Move a work item directly after a sibling (or to the front).
pub async fn move_after(
    state: &AppState,
    actor: &AuthUser,
    id: DbId,
    request: &MoveRequest,
) -> AppResult<WorkItem> {
    let item = find_mutable(state, actor, id, Action::Change).await?;

    let mut order = slot(state, &item, request).await?;
    if order.is_none() {
        WorkItemRepo::renumber(&state.pool, item.section_id).await?;
        order = slot(state, &item, request).await?;
    }
    let sort_order = order.ok_or_else(|| {
        AppError::InternalError(format!("No order slot for work item {id} after renumbering"))
    })?;

    let update = UpdateWorkItem {
        sort_order: Some(sort_order),
        ..Default::default()
    };
    WorkItemRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(ENTITY, id))
}

async fn slot(
    state: &AppState,
    item: &WorkItem,
    request: &MoveRequest,
) -> AppResult<Option<f64>> {
    let siblings: Vec<(DbId, f64)> = WorkItemRepo::list_for_section(&state.pool, item.section_id)
        .await?
        .into_iter()
        .map(|w| (w.id, w.sort_order))
        .collect();
    let (before, after) = neighbours(&siblings, item.id, request.after_id).ok_or_else(|| {
        CoreError::field("after_id", "Must be another work item of the same section")
    })?;
    Ok(order_between(before, after))
}
