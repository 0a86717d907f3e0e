//! Repository for the `tasks` table.

use sqlx::PgPool;
use workbound_core::filters::{optional_contains, Page};
use workbound_core::types::DbId;

use crate::models::category::TemplateFilter;
use crate::models::task::{CreateTask, Task, UpdateTask};

const COLUMNS: &str = "id, title, description, duration, completion_days, created_by_id, \
                       archived_at, created_at, updated_at";

/// Provides CRUD operations for task templates. Tasks are archived, never deleted.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task. `completion_days` defaults to 1.
    pub async fn create(
        pool: &PgPool,
        created_by_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (title, description, duration, completion_days, created_by_id)
             VALUES ($1, COALESCE($2, ''), $3, COALESCE($4, 1), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration)
            .bind(input.completion_days)
            .bind(created_by_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks by title. Archived rows are skipped unless requested.
    pub async fn list(
        pool: &PgPool,
        filter: &TemplateFilter,
        page: Page,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE ($1::TEXT IS NULL OR title ILIKE $1)
               AND ($2 OR archived_at IS NULL)
             ORDER BY title, id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Task>(&query)
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
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                duration = COALESCE($4, duration),
                completion_days = COALESCE($5, completion_days)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration)
            .bind(input.completion_days)
            .fetch_optional(pool)
            .await
    }

    /// Mark a task archived. Returns `true` if the row exists.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE tasks SET archived_at = COALESCE(archived_at, NOW()) WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
