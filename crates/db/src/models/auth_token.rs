//! Opaque API token model.

use sqlx::FromRow;
use workbound_core::types::{DbId, Timestamp};

/// A row from the `auth_tokens` table. Only the SHA-256 hash is stored.
#[derive(Debug, Clone, FromRow)]
pub struct AuthToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub last_used_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
