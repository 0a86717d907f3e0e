//! Repository for `permissions` and the `user_permissions` join table.

use sqlx::PgPool;
use workbound_core::types::DbId;

use crate::models::permission::PermissionEntry;

/// Provides permission lookups and grants.
pub struct PermissionRepo;

impl PermissionRepo {
    /// Whether the user holds the permission with `codename`.
    pub async fn user_has_permission(
        pool: &PgPool,
        user_id: DbId,
        codename: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM user_permissions up
                 JOIN permissions p ON p.id = up.permission_id
                 WHERE up.user_id = $1 AND p.codename = $2
             )",
        )
        .bind(user_id)
        .bind(codename)
        .fetch_one(pool)
        .await
    }

    /// Permissions held by a user, optionally restricted to one model.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        model: Option<&str>,
    ) -> Result<Vec<PermissionEntry>, sqlx::Error> {
        sqlx::query_as::<_, PermissionEntry>(
            "SELECT p.id, p.codename, p.name, p.model
             FROM permissions p
             JOIN user_permissions up ON up.permission_id = p.id
             WHERE up.user_id = $1 AND ($2::TEXT IS NULL OR p.model = $2)
             ORDER BY p.model, p.id",
        )
        .bind(user_id)
        .bind(model)
        .fetch_all(pool)
        .await
    }

    /// Every permission, optionally restricted to one model.
    pub async fn list_all(
        pool: &PgPool,
        model: Option<&str>,
    ) -> Result<Vec<PermissionEntry>, sqlx::Error> {
        sqlx::query_as::<_, PermissionEntry>(
            "SELECT id, codename, name, model FROM permissions
             WHERE ($1::TEXT IS NULL OR model = $1)
             ORDER BY model, id",
        )
        .bind(model)
        .fetch_all(pool)
        .await
    }

    /// Grant a permission by codename.
    ///
    /// Returns `None` when the codename does not exist. Granting twice is a no-op.
    pub async fn grant(
        pool: &PgPool,
        user_id: DbId,
        codename: &str,
    ) -> Result<Option<PermissionEntry>, sqlx::Error> {
        let Some(permission) = sqlx::query_as::<_, PermissionEntry>(
            "SELECT id, codename, name, model FROM permissions WHERE codename = $1",
        )
        .bind(codename)
        .fetch_optional(pool)
        .await?
        else {
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO user_permissions (user_id, permission_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(permission.id)
        .execute(pool)
        .await?;

        Ok(Some(permission))
    }

    /// Revoke a permission by codename. Returns `true` if a grant was removed.
    pub async fn revoke(pool: &PgPool, user_id: DbId, codename: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_permissions up
             USING permissions p
             WHERE up.permission_id = p.id AND up.user_id = $1 AND p.codename = $2",
        )
        .bind(user_id)
        .bind(codename)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
