//! Repository for the `profiles` table.

use sqlx::PgPool;
use workbound_core::types::DbId;

use crate::models::profile::{Profile, UpdateProfile};

const COLUMNS: &str =
    "user_id, first_name, last_name, phone, image_path, thumbnail_path, created_at, updated_at";

/// Profiles are created by [`crate::repositories::UserRepo::create_with_profile`];
/// this repository only reads and edits them.
pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update the text fields. Image paths are untouched.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                first_name = CASE WHEN $2 THEN $3 ELSE first_name END,
                last_name = CASE WHEN $4 THEN $5 ELSE last_name END,
                phone = CASE WHEN $6 THEN $7 ELSE phone END
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(input.first_name.is_some())
            .bind(input.first_name.as_ref().and_then(|v| v.as_deref()))
            .bind(input.last_name.is_some())
            .bind(input.last_name.as_ref().and_then(|v| v.as_deref()))
            .bind(input.phone.is_some())
            .bind(input.phone.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Replace both image paths. Passing `None` for both clears the image.
    pub async fn set_image(
        pool: &PgPool,
        user_id: DbId,
        image_path: Option<&str>,
        thumbnail_path: Option<&str>,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET image_path = $2, thumbnail_path = $3
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(image_path)
            .bind(thumbnail_path)
            .fetch_optional(pool)
            .await
    }
}
