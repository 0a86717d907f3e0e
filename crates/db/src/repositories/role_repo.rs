//! Repositories for `roles` and the `role_types` lookup table.

use sqlx::PgPool;
use workbound_core::filters::Page;
use workbound_core::types::DbId;

use crate::models::role::{CreateRole, Role, RoleDetail, RoleType, UpdateRole};

const COLUMNS: &str = "id, user_id, category_id, role_type_id, created_at, updated_at";

const ROLE_TYPE_COLUMNS: &str = "id, name, level, created_at, updated_at";

/// Provides CRUD operations for roles.
pub struct RoleRepo;

impl RoleRepo {
    /// Insert a new role. Fails with `uq_roles_user_category_type` on a duplicate triple.
    pub async fn create(pool: &PgPool, input: &CreateRole) -> Result<Role, sqlx::Error> {
        let query = format!(
            "INSERT INTO roles (user_id, category_id, role_type_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(input.user_id)
            .bind(input.category_id)
            .bind(input.role_type_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List roles, optionally narrowed to one category.
    pub async fn list(
        pool: &PgPool,
        category_id: Option<DbId>,
        page: Page,
    ) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM roles
             WHERE ($1::BIGINT IS NULL OR category_id = $1)
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(category_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Roles held by one user, joined with category title and role type.
    pub async fn list_details_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RoleDetail>, sqlx::Error> {
        sqlx::query_as::<_, RoleDetail>(
            "SELECT r.id, r.user_id, r.category_id, c.title AS category_title,
                    r.role_type_id, rt.name AS role_type_name, rt.level
             FROM roles r
             JOIN categories c ON c.id = r.category_id
             JOIN role_types rt ON rt.id = r.role_type_id
             WHERE r.user_id = $1
             ORDER BY c.title, rt.level DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRole,
    ) -> Result<Option<Role>, sqlx::Error> {
        let query = format!(
            "UPDATE roles SET
                category_id = COALESCE($2, category_id),
                role_type_id = COALESCE($3, role_type_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(input.role_type_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether `user_id` holds a role of at least `min_level` on the category
    /// of the section that contains `work_item_id`.
    pub async fn has_level_for_work_item(
        pool: &PgPool,
        user_id: DbId,
        work_item_id: DbId,
        min_level: f64,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM work_items w
                 JOIN sections s ON s.id = w.section_id
                 JOIN roles r ON r.category_id = s.category_id
                 JOIN role_types rt ON rt.id = r.role_type_id
                 WHERE w.id = $1 AND r.user_id = $2 AND rt.level >= $3
             )",
        )
        .bind(work_item_id)
        .bind(user_id)
        .bind(min_level)
        .fetch_one(pool)
        .await
    }
}

/// Read-only access to the seeded role types.
pub struct RoleTypeRepo;

impl RoleTypeRepo {
    /// All role types, lowest level first.
    pub async fn list(pool: &PgPool) -> Result<Vec<RoleType>, sqlx::Error> {
        let query = format!("SELECT {ROLE_TYPE_COLUMNS} FROM role_types ORDER BY level, id");
        sqlx::query_as::<_, RoleType>(&query).fetch_all(pool).await
    }

    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<RoleType>, sqlx::Error> {
        let query = format!("SELECT {ROLE_TYPE_COLUMNS} FROM role_types WHERE name = $1");
        sqlx::query_as::<_, RoleType>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
