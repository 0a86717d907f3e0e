//! Per-user profile model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use workbound_core::types::{DbId, Timestamp};

/// A profile row from the `profiles` table. Keyed by the owning user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub user_id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    /// Path relative to `MEDIA_ROOT`.
    pub image_path: Option<String>,
    /// Path relative to `MEDIA_ROOT`, regenerated whenever `image_path` changes.
    pub thumbnail_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating the text fields of a profile. `Some(None)` clears a field.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfile {
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(max = 40, message = "Ensure this field has no more than 40 characters"))]
    pub first_name: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(max = 40, message = "Ensure this field has no more than 40 characters"))]
    pub last_name: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(custom(function = "workbound_core::validation::validate_phone"))]
    pub phone: Option<Option<String>>,
}
