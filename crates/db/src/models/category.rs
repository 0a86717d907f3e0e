//! Category entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use workbound_core::types::{DbId, Timestamp};

/// A category row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub created_by_id: DbId,
    /// Set instead of deleting; archived categories drop out of lists.
    pub archived_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 80))]
    pub title: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

/// DTO for updating an existing category. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 80))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

/// Filters shared by the category and task lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    #[serde(default)]
    pub include_archived: bool,
}
