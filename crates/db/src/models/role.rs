//! Role and role-type models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use workbound_core::types::{DbId, Timestamp};

/// A role type row from the `role_types` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleType {
    pub id: DbId,
    pub name: String,
    pub level: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A role row: one (user, category, role type) triple.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub user_id: DbId,
    pub category_id: DbId,
    pub role_type_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A role joined with its role type and category, for "my roles" views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub category_id: DbId,
    pub category_title: String,
    pub role_type_id: DbId,
    pub role_type_name: String,
    pub level: f64,
}

/// DTO for creating a new role.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRole {
    pub user_id: DbId,
    pub category_id: DbId,
    pub role_type_id: DbId,
}

/// DTO for updating an existing role. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRole {
    pub category_id: Option<DbId>,
    pub role_type_id: Option<DbId>,
}
