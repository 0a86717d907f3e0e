//! Repository for the `categories` table.

use sqlx::PgPool;
use workbound_core::filters::{optional_contains, Page};
use workbound_core::types::DbId;

use crate::models::category::{Category, CreateCategory, TemplateFilter, UpdateCategory};

const COLUMNS: &str = "id, title, description, created_by_id, archived_at, created_at, updated_at";

/// Provides CRUD operations for categories. Categories are archived, never deleted.
pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn create(
        pool: &PgPool,
        created_by_id: DbId,
        input: &CreateCategory,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (title, description, created_by_id)
             VALUES ($1, COALESCE($2, ''), $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(created_by_id)
            .fetch_one(pool)
            .await
    }

    /// Find a category by ID, archived or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List categories by title. Archived rows are skipped unless requested.
    pub async fn list(
        pool: &PgPool,
        filter: &TemplateFilter,
        page: Page,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE ($1::TEXT IS NULL OR title ILIKE $1)
               AND ($2 OR archived_at IS NULL)
             ORDER BY title, id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(optional_contains(filter.title.as_deref()))
            .bind(filter.include_archived)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                title = COALESCE($2, title),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Mark a category archived. Archiving twice keeps the first timestamp.
    /// Returns `true` if the row exists.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE categories SET archived_at = COALESCE(archived_at, NOW()) WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
