//! Repository for the `sections` table.

use sqlx::PgPool;
use workbound_core::filters::{optional_contains, Page};
use workbound_core::ids::{generate_public_id, SECTION_PREFIX};
use workbound_core::ordering::{next_order, renumbered};
use workbound_core::types::DbId;

use crate::models::section::{CreateSection, Section, SectionFilter, UpdateSection};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, public_id, sort_order, portfolio_id, category_id, completed_at, \
                       meta, created_by_id, created_at, updated_at";

/// Provides CRUD operations for sections.
pub struct SectionRepo;

impl SectionRepo {
    /// Insert a new section, appending it after its siblings when no order is given.
    ///
    /// The parent portfolio row is locked for the duration of the insert so
    /// two concurrent appends cannot read the same maximum order.
    pub async fn create(
        pool: &PgPool,
        created_by_id: DbId,
        input: &CreateSection,
    ) -> Result<Section, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM portfolios WHERE id = $1 FOR UPDATE")
            .bind(input.portfolio_id)
            .fetch_optional(&mut *tx)
            .await?;

        let sort_order = match input.sort_order {
            Some(order) => order,
            None => {
                let max: Option<f64> = sqlx::query_scalar(
                    "SELECT MAX(sort_order) FROM sections WHERE portfolio_id = $1",
                )
                .bind(input.portfolio_id)
                .fetch_one(&mut *tx)
                .await?;
                next_order(max)
            }
        };

        let query = format!(
            "INSERT INTO sections
                (public_id, sort_order, portfolio_id, category_id, completed_at, meta, created_by_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let section = sqlx::query_as::<_, Section>(&query)
            .bind(generate_public_id(SECTION_PREFIX))
            .bind(sort_order)
            .bind(input.portfolio_id)
            .bind(input.category_id)
            .bind(input.completed_at)
            .bind(&input.meta)
            .bind(created_by_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(section)
    }

    /// Find a section by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Section>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sections WHERE id = $1");
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All sections of a portfolio in display order.
    pub async fn list_for_portfolio(
        pool: &PgPool,
        portfolio_id: DbId,
    ) -> Result<Vec<Section>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sections WHERE portfolio_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(portfolio_id)
            .fetch_all(pool)
            .await
    }

    /// List sections matching `filter`, by portfolio then display order.
    pub async fn list(
        pool: &PgPool,
        filter: &SectionFilter,
        page: Page,
    ) -> Result<Vec<Section>, sqlx::Error> {
        let (created_from, created_until) = filter.created().bounds();
        let (completed_from, completed_until) = filter.completed().bounds();
        let query = format!(
            "SELECT {COLUMNS} FROM sections s
             WHERE ($1::TEXT IS NULL OR s.public_id = $1)
               AND ($2::BIGINT IS NULL OR s.portfolio_id = $2)
               AND ($3::BIGINT IS NULL OR EXISTS (
                    SELECT 1 FROM work_items w
                    WHERE w.section_id = s.id AND w.assigned_to_id = $3))
               AND ($4::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM work_items w
                    JOIN users u ON u.id = w.assigned_to_id
                    WHERE w.section_id = s.id AND u.email ILIKE $4))
               AND ($5::TIMESTAMPTZ IS NULL OR s.created_at >= $5)
               AND ($6::TIMESTAMPTZ IS NULL OR s.created_at < $6)
               AND ($7::TIMESTAMPTZ IS NULL OR s.completed_at >= $7)
               AND ($8::TIMESTAMPTZ IS NULL OR s.completed_at < $8)
             ORDER BY s.portfolio_id, s.sort_order, s.id
             LIMIT $9 OFFSET $10"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(&filter.public_id)
            .bind(filter.portfolio_id)
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

    /// Update a section. Only fields present in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSection,
    ) -> Result<Option<Section>, sqlx::Error> {
        let query = format!(
            "UPDATE sections SET
                category_id = COALESCE($2, category_id),
                sort_order = COALESCE($3, sort_order),
                completed_at = CASE WHEN $4 THEN $5 ELSE completed_at END,
                meta = CASE WHEN $6 THEN $7 ELSE meta END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(input.sort_order)
            .bind(input.completed_at.is_some())
            .bind(input.completed_at.flatten())
            .bind(input.meta.is_some())
            .bind(input.meta.as_ref().and_then(Option::as_ref))
            .fetch_optional(pool)
            .await
    }

    /// Rewrite the orders of a portfolio's sections to 0.1, 0.2, ...
    /// keeping their current sequence. Returns the sections in their new order.
    pub async fn renumber(pool: &PgPool, portfolio_id: DbId) -> Result<Vec<Section>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM portfolios WHERE id = $1 FOR UPDATE")
            .bind(portfolio_id)
            .fetch_optional(&mut *tx)
            .await?;

        let ids: Vec<DbId> = sqlx::query_scalar(
            "SELECT id FROM sections WHERE portfolio_id = $1 ORDER BY sort_order, id",
        )
        .bind(portfolio_id)
        .fetch_all(&mut *tx)
        .await?;
        let orders = renumbered(ids.len());

        sqlx::query(
            "UPDATE sections s SET sort_order = v.sort_order
             FROM UNNEST($1::BIGINT[], $2::DOUBLE PRECISION[]) AS v(id, sort_order)
             WHERE s.id = v.id",
        )
        .bind(&ids)
        .bind(&orders)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM sections WHERE portfolio_id = $1 ORDER BY sort_order, id"
        );
        let sections = sqlx::query_as::<_, Section>(&query)
            .bind(portfolio_id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(sections)
    }

    /// Permanently delete a section; its work items cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
