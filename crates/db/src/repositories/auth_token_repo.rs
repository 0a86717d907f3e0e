//! Repository for the `auth_tokens` table.

use sqlx::PgPool;
use workbound_core::types::DbId;

use crate::models::auth_token::AuthToken;
use crate::models::user::User;

const COLUMNS: &str = "id, user_id, token_hash, last_used_at, created_at, updated_at";

/// Provides storage for opaque API tokens.
pub struct AuthTokenRepo;

impl AuthTokenRepo {
    /// Store a token hash for a user, replacing any previous token.
    pub async fn replace_for_user(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
    ) -> Result<AuthToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO auth_tokens (user_id, token_hash)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_auth_tokens_user_id
             DO UPDATE SET token_hash = EXCLUDED.token_hash, last_used_at = NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuthToken>(&query)
            .bind(user_id)
            .bind(token_hash)
            .fetch_one(pool)
            .await
    }

    /// Resolve a token hash to its active owner, stamping `last_used_at`.
    pub async fn find_active_user(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "WITH touched AS (
                 UPDATE auth_tokens SET last_used_at = NOW()
                 WHERE token_hash = $1
                 RETURNING user_id
             )
             SELECT u.id, u.email, u.password_hash, u.identity_uid, u.is_staff,
                    u.is_superuser, u.is_active, u.date_joined, u.last_login_at,
                    u.created_at, u.updated_at
             FROM users u JOIN touched t ON t.user_id = u.id
             WHERE u.is_active = true",
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await
    }

    /// Delete the token of a user. Returns `true` if one existed.
    pub async fn revoke_for_user(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
