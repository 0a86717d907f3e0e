//! Handlers for the caller's own account under `/user`.

use std::collections::BTreeMap;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use workbound_db::models::profile::Profile;
use workbound_db::models::user::{RegisterUser, UpdateUserRequest, UserResponse};
use workbound_db::repositories::AuthTokenRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::services::accounts::{self, TokenRequest, TokenResponse};
use crate::services::permissions::{self, ModelPermissions};
use crate::services::profiles::{self, ProfileChanges};
use crate::services::users::{self, UserDetail};
use crate::state::AppState;

/// POST /api/v1/user/create (public)
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = accounts::register(&state, input).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /api/v1/user/token (public)
pub async fn issue_token(
    State(state): State<AppState>,
    Json(input): Json<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    Ok(Json(accounts::issue_token(&state, &input).await?))
}

/// DELETE /api/v1/user/token
pub async fn revoke_token(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    AuthTokenRepo::revoke_for_user(&state.pool, user.user_id).await?;
    tracing::info!(user_id = user.user_id, "API token revoked");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/user/sync
///
/// Resolving the credential already provisions or links the local user, so
/// this only reports the result.
pub async fn sync(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<UserDetail>> {
    Ok(Json(users::me(&state, &user).await?))
}

/// GET /api/v1/user/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<UserDetail>> {
    Ok(Json(users::me(&state, &user).await?))
}

/// PUT|PATCH /api/v1/user/me
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserDetail>> {
    Ok(Json(users::update_me(&state, &user, &input).await?))
}

/// PUT|PATCH /api/v1/user/me/profile (multipart)
///
/// Text fields `first_name`, `last_name`, `phone`; file field `image`;
/// `clear_image=true` removes the current image.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<Profile>> {
    let mut changes = ProfileChanges::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read image: {e}")))?;
                if !bytes.is_empty() {
                    changes.image = Some(bytes.to_vec());
                }
            }
            "first_name" | "last_name" | "phone" | "clear_image" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| {
                        AppError::BadRequest(format!("Failed to read field {name}: {e}"))
                    })?;
                // An empty text field clears the stored value.
                let text = Some(value.clone()).filter(|v| !v.trim().is_empty());
                match name.as_str() {
                    "first_name" => changes.fields.first_name = Some(text),
                    "last_name" => changes.fields.last_name = Some(text),
                    "phone" => changes.fields.phone = Some(text),
                    _ => changes.clear_image = matches!(value.trim(), "true" | "1" | "on"),
                }
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown profile field");
            }
        }
    }

    Ok(Json(profiles::update(&state, &user, changes).await?))
}

/// GET /api/v1/user/perms
///
/// Keyed by model, unwrapped like the per-model listing.
pub async fn my_permissions(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<BTreeMap<String, ModelPermissions>>> {
    Ok(Json(permissions::mine(&state, &user).await?))
}

/// GET /api/v1/user/perms/{model}
pub async fn my_model_permissions(
    State(state): State<AppState>,
    user: AuthUser,
    Path(model): Path<String>,
) -> AppResult<Json<BTreeMap<String, ModelPermissions>>> {
    Ok(Json(permissions::mine_for_model(&state, &user, &model).await?))
}
