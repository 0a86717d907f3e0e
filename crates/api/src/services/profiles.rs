//! Profile edits, including image upload and thumbnail generation.
//!
//! Images are written under `MEDIA_ROOT/user_<id>/` and the profile row
//! stores paths relative to `MEDIA_ROOT`.

use std::path::Path;

use validator::Validate;
use workbound_core::error::CoreError;
use workbound_core::ids::generate_public_id;
use workbound_core::thumbnail::{make_thumbnail, ThumbnailError};
use workbound_core::types::DbId;
use workbound_db::models::profile::{Profile, UpdateProfile};
use workbound_db::repositories::ProfileRepo;

use super::not_found;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const ENTITY: &str = "Profile";

/// Everything a profile update can carry.
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub fields: UpdateProfile,
    /// Raw bytes of a newly uploaded image.
    pub image: Option<Vec<u8>>,
    /// Remove the current image and thumbnail.
    pub clear_image: bool,
}

/// Apply `changes` to the caller's profile.
///
/// A new image replaces the old one and its thumbnail; `clear_image` removes
/// both. Text-only edits leave the image untouched. The image is decoded and
/// stored before any row is written, so a rejected upload changes nothing.
pub async fn update(
    state: &AppState,
    actor: &AuthUser,
    changes: ProfileChanges,
) -> AppResult<Profile> {
    changes.fields.validate()?;
    if changes.image.is_some() && changes.clear_image {
        let message = "Either upload an image or clear it, not both";
        return Err(CoreError::field("image", message).into());
    }

    let previous = ProfileRepo::find_by_user_id(&state.pool, actor.user_id)
        .await?
        .ok_or_else(|| not_found(ENTITY, actor.user_id))?;

    let stored = match &changes.image {
        Some(bytes) => Some(store_image(&state.config.media_root, actor.user_id, bytes).await?),
        None => None,
    };

    let mut profile = ProfileRepo::update(&state.pool, actor.user_id, &changes.fields)
        .await?
        .ok_or_else(|| not_found(ENTITY, actor.user_id))?;

    if let Some((image_path, thumbnail_path)) = stored {
        profile = ProfileRepo::set_image(
            &state.pool,
            actor.user_id,
            Some(&image_path),
            Some(&thumbnail_path),
        )
        .await?
        .ok_or_else(|| not_found(ENTITY, actor.user_id))?;
        tracing::info!(user_id = actor.user_id, %image_path, "Profile image stored");
        remove_files(&state.config.media_root, &previous).await;
    } else if changes.clear_image {
        profile = ProfileRepo::set_image(&state.pool, actor.user_id, None, None)
            .await?
            .ok_or_else(|| not_found(ENTITY, actor.user_id))?;
        tracing::info!(user_id = actor.user_id, "Profile image cleared");
        remove_files(&state.config.media_root, &previous).await;
    }

    Ok(profile)
}

/// Write the image and its thumbnail, returning both relative paths.
async fn store_image(
    media_root: &Path,
    user_id: DbId,
    bytes: &[u8],
) -> AppResult<(String, String)> {
    let thumbnail = make_thumbnail(bytes).map_err(|e| match e {
        ThumbnailError::UnsupportedFormat | ThumbnailError::EmptyImage => CoreError::field(
            "image",
            "Upload a valid image. The file you uploaded was either not an image or a corrupted image.",
        ),
        ThumbnailError::TooWide { .. } => {
            CoreError::field("image", "Image is too wide; keep the aspect ratio under 20:1.")
        }
        ThumbnailError::Codec(err) => {
            tracing::warn!(error = %err, user_id, "Profile image could not be decoded");
            CoreError::field("image", "Upload a valid image.")
        }
    })?;

    let dir = format!("user_{user_id}");
    let stem = generate_public_id("img");
    let image_path = format!("{dir}/{stem}.{}", thumbnail.extension());
    let thumbnail_path = format!("{dir}/{stem}_thumb.{}", thumbnail.extension());

    let io_error =
        |e: std::io::Error| AppError::InternalError(format!("Media storage failed: {e}"));
    tokio::fs::create_dir_all(media_root.join(&dir))
        .await
        .map_err(io_error)?;
    tokio::fs::write(media_root.join(&image_path), bytes)
        .await
        .map_err(io_error)?;
    tokio::fs::write(media_root.join(&thumbnail_path), &thumbnail.bytes)
        .await
        .map_err(io_error)?;

    Ok((image_path, thumbnail_path))
}

/// Delete the files a profile used to point at. Missing files are ignored.
async fn remove_files(media_root: &Path, previous: &Profile) {
    for path in [&previous.image_path, &previous.thumbnail_path].into_iter().flatten() {
        if let Err(e) = tokio::fs::remove_file(media_root.join(path)).await {
            tracing::debug!(error = %e, %path, "Old profile file not removed");
        }
    }
}
