//! Repository for the `portfolios` table.

use sqlx::PgPool;
use workbound_core::filters::{optional_contains, Page};
use workbound_core::ids::{generate_public_id, PORTFOLIO_PREFIX};
use workbound_core::types::DbId;

use crate::models::portfolio::{CreatePortfolio, Portfolio, PortfolioFilter, UpdatePortfolio};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, public_id, reference, completed_at, meta, created_by_id, created_at, updated_at";

/// Provides CRUD operations for portfolios.
pub struct PortfolioRepo;

impl PortfolioRepo {
    /// Insert a new portfolio with a freshly generated public id.
    ///
    /// `reference` falls back to the public id when absent.
    pub async fn create(
        pool: &PgPool,
        created_by_id: DbId,
        input: &CreatePortfolio,
    ) -> Result<Portfolio, sqlx::Error> {
        let public_id = generate_public_id(PORTFOLIO_PREFIX);
        let query = format!(
            "INSERT INTO portfolios (public_id, reference, completed_at, meta, created_by_id)
             VALUES ($1, COALESCE($2, $1), $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Portfolio>(&query)
            .bind(&public_id)
            .bind(&input.reference)
            .bind(input.completed_at)
            .bind(&input.meta)
            .bind(created_by_id)
            .fetch_one(pool)
            .await
    }

    /// Find a portfolio by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Portfolio>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM portfolios WHERE id = $1");
        sqlx::query_as::<_, Portfolio>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List portfolios matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &PortfolioFilter,
        page: Page,
    ) -> Result<Vec<Portfolio>, sqlx::Error> {
        let (created_from, created_until) = filter.created().bounds();
        let (completed_from, completed_until) = filter.completed().bounds();
        let query = format!(
            "SELECT {COLUMNS} FROM portfolios p
             WHERE ($1::TEXT IS NULL OR p.public_id = $1)
               AND ($2::BIGINT IS NULL OR EXISTS (
                    SELECT 1 FROM sections s
                    JOIN work_items w ON w.section_id = s.id
                    WHERE s.portfolio_id = p.id AND w.assigned_to_id = $2))
               AND ($3::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM sections s
                    JOIN work_items w ON w.section_id = s.id
                    JOIN users u ON u.id = w.assigned_to_id
                    WHERE s.portfolio_id = p.id AND u.email ILIKE $3))
               AND ($4::TIMESTAMPTZ IS NULL OR p.created_at >= $4)
               AND ($5::TIMESTAMPTZ IS NULL OR p.created_at < $5)
               AND ($6::TIMESTAMPTZ IS NULL OR p.completed_at >= $6)
               AND ($7::TIMESTAMPTZ IS NULL OR p.completed_at < $7)
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT $8 OFFSET $9"
        );
        sqlx::query_as::<_, Portfolio>(&query)
            .bind(&filter.public_id)
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

    /// Update a portfolio. Only fields present in `input` are applied;
    /// `completed_at` and `meta` may be cleared with `Some(None)`.
    ///
    /// The public id is never touched. Returns `None` if no row with the
    /// given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePortfolio,
    ) -> Result<Option<Portfolio>, sqlx::Error> {
        let query = format!(
            "UPDATE portfolios SET
                reference = COALESCE($2, reference),
                completed_at = CASE WHEN $3 THEN $4 ELSE completed_at END,
                meta = CASE WHEN $5 THEN $6 ELSE meta END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Portfolio>(&query)
            .bind(id)
            .bind(&input.reference)
            .bind(input.completed_at.is_some())
            .bind(input.completed_at.flatten())
            .bind(input.meta.is_some())
            .bind(input.meta.as_ref().and_then(Option::as_ref))
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a portfolio; its sections and work items cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolios WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
