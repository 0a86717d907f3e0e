//! Portfolio entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use workbound_core::filters::DateRange;
use workbound_core::types::{DbId, Timestamp};

use crate::models::section::Section;

/// A portfolio row from the `portfolios` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Portfolio {
    pub id: DbId,
    /// Generated `pf_...` identifier, assigned once at insert.
    pub public_id: String,
    pub reference: String,
    pub completed_at: Option<Timestamp>,
    pub meta: Option<serde_json::Value>,
    pub created_by_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A portfolio together with its sections in display order.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioDetail {
    #[serde(flatten)]
    pub portfolio: Portfolio,
    pub sections: Vec<Section>,
}

/// DTO for creating a new portfolio.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreatePortfolio {
    /// Defaults to the generated public id if omitted.
    #[validate(length(min = 1, max = 255))]
    pub reference: Option<String>,
    pub completed_at: Option<Timestamp>,
    #[validate(custom(function = "workbound_core::validation::validate_meta"))]
    pub meta: Option<serde_json::Value>,
}

/// DTO for updating an existing portfolio. All fields are optional.
///
/// Nullable columns use `Option<Option<T>>`: an absent key keeps the stored
/// value and an explicit `null` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePortfolio {
    #[validate(length(min = 1, max = 255))]
    pub reference: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub completed_at: Option<Option<Timestamp>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(custom(function = "workbound_core::validation::validate_meta"))]
    pub meta: Option<Option<serde_json::Value>>,
}

/// Filters accepted by the portfolio list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioFilter {
    pub public_id: Option<String>,
    /// Matches portfolios with any work item assigned to this user.
    pub assigned_to_id: Option<DbId>,
    /// Case-insensitive substring of the assignee's email.
    pub assigned_to_email: Option<String>,
    pub created_after: Option<NaiveDate>,
    pub created_before: Option<NaiveDate>,
    pub completed_after: Option<NaiveDate>,
    pub completed_before: Option<NaiveDate>,
}

impl PortfolioFilter {
    pub fn created(&self) -> DateRange {
        DateRange::new(self.created_after, self.created_before)
    }

    pub fn completed(&self) -> DateRange {
        DateRange::new(self.completed_after, self.completed_before)
    }
}
