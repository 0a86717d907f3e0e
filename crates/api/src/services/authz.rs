//! Model and object permission checks.

use workbound_core::error::CoreError;
use workbound_core::permissions::{Action, ModelKind, Permission};
use workbound_core::roles::MANAGER_LEVEL;
use workbound_db::models::work_item::WorkItem;
use workbound_db::repositories::{PermissionRepo, RoleRepo};
use workbound_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Allow `actor` to perform `action` on `model`, or fail with the fixed denial.
///
/// Superusers are allowed everything; everyone else needs the
/// `<action>_<model>` permission.
pub async fn authorize(
    pool: &DbPool,
    actor: &AuthUser,
    action: Action,
    model: ModelKind,
) -> AppResult<()> {
    if actor.is_superuser {
        return Ok(());
    }
    let codename = Permission::new(action, model).codename();
    if PermissionRepo::user_has_permission(pool, actor.user_id, &codename).await? {
        Ok(())
    } else {
        tracing::debug!(user_id = actor.user_id, %codename, "Permission denied");
        Err(AppError::Core(CoreError::permission_denied()))
    }
}

/// Object rule for changing or deleting a work item: the actor must be its
/// assignee or hold a manager-level role on the section's category.
///
/// Applied after [`authorize`]. Superuser status does not bypass it.
pub async fn authorize_work_item(
    pool: &DbPool,
    actor: &AuthUser,
    work_item: &WorkItem,
) -> AppResult<()> {
    if work_item.assigned_to_id == Some(actor.user_id) {
        return Ok(());
    }
    if RoleRepo::has_level_for_work_item(pool, actor.user_id, work_item.id, MANAGER_LEVEL).await? {
        return Ok(());
    }
    tracing::debug!(
        user_id = actor.user_id,
        work_item_id = work_item.id,
        "Work item is neither assigned to the caller nor in a managed category"
    );
    Err(AppError::Core(CoreError::permission_denied()))
}

/// Unwrap an optional caller, denying anonymous access with the fixed message.
pub fn require_actor(actor: Option<&AuthUser>) -> Result<&AuthUser, CoreError> {
    actor.ok_or_else(CoreError::permission_denied)
}
