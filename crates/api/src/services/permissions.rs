//! Permission listings for the caller and superuser grant/revoke.

use std::collections::BTreeMap;

use serde::Serialize;
use workbound_core::error::CoreError;
use workbound_core::permissions::{ModelKind, Permission};
use workbound_core::types::DbId;
use workbound_db::models::permission::PermissionEntry;
use workbound_db::repositories::{PermissionRepo, UserRepo};

use super::not_found;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// One held permission as shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionStatus {
    /// Human name, e.g. "Can view Task".
    pub verbose: String,
    pub status: bool,
}

/// Codename -> status for one model.
pub type ModelPermissions = BTreeMap<String, PermissionStatus>;

/// Group permission rows as `model -> codename -> status`.
pub fn group_by_model(entries: Vec<PermissionEntry>) -> BTreeMap<String, ModelPermissions> {
    let mut grouped: BTreeMap<String, ModelPermissions> = BTreeMap::new();
    for entry in entries {
        grouped.entry(entry.model).or_default().insert(
            entry.codename,
            PermissionStatus {
                verbose: entry.name,
                status: true,
            },
        );
    }
    grouped
}

/// Permissions the caller effectively holds. Superusers hold all of them.
async fn held(
    state: &AppState,
    actor: &AuthUser,
    model: Option<ModelKind>,
) -> AppResult<Vec<PermissionEntry>> {
    let model = model.map(ModelKind::as_str);
    let entries = if actor.is_superuser {
        PermissionRepo::list_all(&state.pool, model).await?
    } else {
        PermissionRepo::list_for_user(&state.pool, actor.user_id, model).await?
    };
    Ok(entries)
}

/// The caller's permissions grouped by model.
pub async fn mine(
    state: &AppState,
    actor: &AuthUser,
) -> AppResult<BTreeMap<String, ModelPermissions>> {
    Ok(group_by_model(held(state, actor, None).await?))
}

/// The caller's permissions for one model, keyed `<model>_permissions`.
pub async fn mine_for_model(
    state: &AppState,
    actor: &AuthUser,
    model: &str,
) -> AppResult<BTreeMap<String, ModelPermissions>> {
    let kind: ModelKind = model.parse().map_err(CoreError::Validation)?;
    let permissions = group_by_model(held(state, actor, Some(kind)).await?)
        .remove(kind.as_str())
        .unwrap_or_default();
    Ok(BTreeMap::from([(format!("{kind}_permissions"), permissions)]))
}

async fn ensure_user(state: &AppState, user_id: DbId) -> AppResult<()> {
    match UserRepo::find_by_id(&state.pool, user_id).await? {
        Some(_) => Ok(()),
        None => Err(not_found("User", user_id)),
    }
}

/// Direct permissions of `user_id`.
pub async fn list_for_user(state: &AppState, user_id: DbId) -> AppResult<Vec<PermissionEntry>> {
    ensure_user(state, user_id).await?;
    Ok(PermissionRepo::list_for_user(&state.pool, user_id, None).await?)
}

/// Grant `codename` to `user_id`. Granting twice is a no-op.
pub async fn grant(
    state: &AppState,
    actor: &AuthUser,
    user_id: DbId,
    codename: &str,
) -> AppResult<PermissionEntry> {
    ensure_user(state, user_id).await?;
    if Permission::parse(codename).is_none() {
        return Err(CoreError::field("codename", format!("Unknown permission '{codename}'")).into());
    }
    let entry = PermissionRepo::grant(&state.pool, user_id, codename)
        .await?
        .ok_or_else(|| CoreError::field("codename", format!("Unknown permission '{codename}'")))?;
    tracing::info!(user_id, %codename, granted_by = actor.user_id, "Permission granted");
    Ok(entry)
}

/// Revoke `codename` from `user_id`. 404 if the user did not hold it.
pub async fn revoke(
    state: &AppState,
    actor: &AuthUser,
    user_id: DbId,
    codename: &str,
) -> AppResult<()> {
    ensure_user(state, user_id).await?;
    if PermissionRepo::revoke(&state.pool, user_id, codename).await? {
        tracing::info!(user_id, %codename, revoked_by = actor.user_id, "Permission revoked");
        Ok(())
    } else {
        Err(AppError::Database(sqlx::Error::RowNotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(codename: &str, name: &str, model: &str) -> PermissionEntry {
        PermissionEntry {
            id: 0,
            codename: codename.into(),
            name: name.into(),
            model: model.into(),
        }
    }

    #[test]
    fn groups_permissions_by_model() {
        let grouped = group_by_model(vec![
            entry("view_task", "Can view Task", "task"),
            entry("add_task", "Can add Task", "task"),
            entry("view_role", "Can view Role", "role"),
        ]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["task"].len(), 2);
        assert_eq!(
            grouped["role"]["view_role"],
            PermissionStatus {
                verbose: "Can view Role".into(),
                status: true
            }
        );
    }
}
