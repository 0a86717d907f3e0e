//! Stored permission rows.

use serde::Serialize;
use sqlx::FromRow;
use workbound_core::types::DbId;

/// A row from the `permissions` table, e.g. `view_task` / "Can view Task".
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct PermissionEntry {
    pub id: DbId,
    pub codename: String,
    pub name: String,
    pub model: String,
}
