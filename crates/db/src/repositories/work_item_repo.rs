//! Repository for the `work_items` table.

use sqlx::PgPool;
use workbound_core::filters::{optional_contains, Page};
use workbound_core::ids::{generate_public_id, WORK_ITEM_PREFIX};
use workbound_core::ordering::{next_order, renumbered};
use workbound_core::types::DbId;

use crate::models::work_item::{CreateWorkItem, UpdateWorkItem, WorkItem, WorkItemFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, public_id, sort_order, section_id, task_id, assigned_to_id, \
                       completed_at, expected_at, meta, created_by_id, created_at, updated_at";

/// Provides CRUD operations for work items.
pub struct WorkItemRepo;

impl WorkItemRepo {
    /// Insert a new work item, appending it after its siblings when no order is given.
    ///
    /// Locks the parent section row while the maximum order is read.
    pub async fn create(
        pool: &PgPool,
        created_by_id: DbId,
        input: &CreateWorkItem,
    ) -> Result<WorkItem, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM sections WHERE id = $1 FOR UPDATE")
            .bind(input.section_id)
            .fetch_optional(&mut *tx)
            .await?;

        let sort_order = match input.sort_order {
            Some(order) => order,
            None => {
                let max: Option<f64> = sqlx::query_scalar(
                    "SELECT MAX(sort_order) FROM work_items WHERE section_id = $1",
                )
                .bind(input.section_id)
                .fetch_one(&mut *tx)
                .await?;
                next_order(max)
            }
        };

        let query = format!(
            "INSERT INTO work_items
                (public_id, sort_order, section_id, task_id, assigned_to_id,
                 completed_at, expected_at, meta, created_by_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let item = sqlx::query_as::<_, WorkItem>(&query)
            .bind(generate_public_id(WORK_ITEM_PREFIX))
            .bind(sort_order)
            .bind(input.section_id)
            .bind(input.task_id)
            .bind(input.assigned_to_id)
            .bind(input.completed_at)
            .bind(input.expected_at)
            .bind(&input.meta)
            .bind(created_by_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(item)
    }

    /// Find a work item by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_items WHERE id = $1");
        sqlx::query_as::<_, WorkItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All work items of a section in display order.
    pub async fn list_for_section(
        pool: &PgPool,
        section_id: DbId,
    ) -> Result<Vec<WorkItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_items WHERE section_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, WorkItem>(&query)
            .bind(section_id)
            .fetch_all(pool)
            .await
    }

    /// List work items matching `filter`, by section then display order.
    pub async fn list(
        pool: &PgPool,
        filter: &WorkItemFilter,
        page: Page,
    ) -> Result<Vec<WorkItem>, sqlx::Error> {
        let (created_from, created_until) = filter.created().bounds();
        let (completed_from, completed_until) = filter.completed().bounds();
        let query = format!(
            "SELECT {COLUMNS} FROM work_items w
             WHERE ($1::BIGINT IS NULL OR w.section_id = $1)
               AND ($2::BIGINT IS NULL OR w.assigned_to_id = $2)
               AND ($3::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM users u
                    WHERE u.id = w.assigned_to_id AND u.email ILIKE $3))
               AND ($4::TIMESTAMPTZ IS NULL OR w.created_at >= $4)
               AND ($5::TIMESTAMPTZ IS NULL OR w.created_at < $5)
               AND ($6::TIMESTAMPTZ IS NULL OR w.completed_at >= $6)
               AND ($7::TIMESTAMPTZ IS NULL OR w.completed_at < $7)
             ORDER BY w.section_id, w.sort_order, w.id
             LIMIT $8 OFFSET $9"
        );
        sqlx::query_as::<_, WorkItem>(&query)
            .bind(filter.section_id)
            .bind(filter.assigned_to_id)
            .bind(optional_contains(filter.assigned_to_email.as_deref()))
            .bind(created_from)
            .bind(created_until)
            .bind(completed_from)
            .bind(completed_until)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Update a work item. Only fields present in `input` are applied;
    /// `Some(None)` clears a nullable column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWorkItem,
    ) -> Result<Option<WorkItem>, sqlx::Error> {
        let query = format!(
            "UPDATE work_items SET
                task_id = COALESCE($2, task_id),
                assigned_to_id = CASE WHEN $3 THEN $4 ELSE assigned_to_id END,
                sort_order = COALESCE($5, sort_order),
                completed_at = CASE WHEN $6 THEN $7 ELSE completed_at END,
                expected_at = CASE WHEN $8 THEN $9 ELSE expected_at END,
                meta = CASE WHEN $10 THEN $11 ELSE meta END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkItem>(&query)
            .bind(id)
            .bind(input.task_id)
            .bind(input.assigned_to_id.is_some())
            .bind(input.assigned_to_id.flatten())
            .bind(input.sort_order)
            .bind(input.completed_at.is_some())
            .bind(input.completed_at.flatten())
            .bind(input.expected_at.is_some())
            .bind(input.expected_at.flatten())
            .bind(input.meta.is_some())
            .bind(input.meta.as_ref().and_then(Option::as_ref))
            .fetch_optional(pool)
            .await
    }

    /// Rewrite the orders of a section's work items to 0.1, 0.2, ...
    /// keeping their current sequence. Returns the items in their new order.
    pub async fn renumber(pool: &PgPool, section_id: DbId) -> Result<Vec<WorkItem>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM sections WHERE id = $1 FOR UPDATE")
            .bind(section_id)
            .fetch_optional(&mut *tx)
            .await?;

        let ids: Vec<DbId> = sqlx::query_scalar(
            "SELECT id FROM work_items WHERE section_id = $1 ORDER BY sort_order, id",
        )
        .bind(section_id)
        .fetch_all(&mut *tx)
        .await?;
        let orders = renumbered(ids.len());

        sqlx::query(
            "UPDATE work_items w SET sort_order = v.sort_order
             FROM UNNEST($1::BIGINT[], $2::DOUBLE PRECISION[]) AS v(id, sort_order)
             WHERE w.id = v.id",
        )
        .bind(&ids)
        .bind(&orders)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM work_items WHERE section_id = $1 ORDER BY sort_order, id"
        );
        let items = sqlx::query_as::<_, WorkItem>(&query)
            .bind(section_id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(items)
    }

    /// Permanently delete a work item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM work_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
