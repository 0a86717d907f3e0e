//! Section entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use workbound_core::filters::DateRange;
use workbound_core::types::{DbId, Timestamp};

/// A section row from the `sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Section {
    pub id: DbId,
    /// Generated `sec_...` identifier, assigned once at insert.
    pub public_id: String,
    pub sort_order: f64,
    pub portfolio_id: DbId,
    pub category_id: DbId,
    pub completed_at: Option<Timestamp>,
    pub meta: Option<serde_json::Value>,
    pub created_by_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new section.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSection {
    pub portfolio_id: DbId,
    pub category_id: DbId,
    /// Appended after the last sibling when omitted.
    pub sort_order: Option<f64>,
    pub completed_at: Option<Timestamp>,
    #[validate(custom(function = "workbound_core::validation::validate_meta"))]
    pub meta: Option<serde_json::Value>,
}

/// DTO for updating an existing section. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSection {
    pub category_id: Option<DbId>,
    pub sort_order: Option<f64>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub completed_at: Option<Option<Timestamp>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(custom(function = "workbound_core::validation::validate_meta"))]
    pub meta: Option<Option<serde_json::Value>>,
}

/// Filters accepted by the section list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionFilter {
    pub public_id: Option<String>,
    pub portfolio_id: Option<DbId>,
    pub assigned_to_id: Option<DbId>,
    pub assigned_to_email: Option<String>,
    pub created_after: Option<NaiveDate>,
    pub created_before: Option<NaiveDate>,
    pub completed_after: Option<NaiveDate>,
    pub completed_before: Option<NaiveDate>,
}

impl SectionFilter {
    pub fn created(&self) -> DateRange {
        DateRange::new(self.created_after, self.created_before)
    }

    pub fn completed(&self) -> DateRange {
        DateRange::new(self.completed_after, self.completed_before)
    }
}
