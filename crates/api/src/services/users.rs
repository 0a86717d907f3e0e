//! User administration (`/users`) and the caller's own account (`/user/me`).

use serde::Serialize;
use validator::Validate;
use workbound_core::error::CoreError;
use workbound_core::filters::{optional_contains, Page};
use workbound_core::permissions::{Action, ModelKind};
use workbound_core::types::DbId;
use workbound_db::models::profile::Profile;
use workbound_db::models::user::{
    CreateUser, RegisterUser, UpdateUser, UpdateUserRequest, UserResponse,
};
use workbound_db::repositories::{ProfileRepo, UserRepo};

use super::authz::authorize;
use super::not_found;
use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const ENTITY: &str = "User";

/// A user together with its profile.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: UserResponse,
    pub profile: Option<Profile>,
}

/// Turn the request DTO into a row update, hashing a new password and
/// dropping the account flags unless the actor is a superuser.
fn to_update(actor: &AuthUser, input: &UpdateUserRequest) -> AppResult<UpdateUser> {
    input.validate()?;
    let password_hash = input
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let (is_active, is_staff) = if actor.is_superuser {
        (input.is_active, input.is_staff)
    } else {
        (None, None)
    };
    Ok(UpdateUser {
        email: input.email.clone(),
        password_hash,
        is_active,
        is_staff,
    })
}

pub async fn list(
    state: &AppState,
    actor: &AuthUser,
    email: Option<&str>,
    page: Page,
) -> AppResult<Vec<UserResponse>> {
    authorize(&state.pool, actor, Action::View, ModelKind::User).await?;
    let pattern = optional_contains(email);
    let users = UserRepo::list(&state.pool, pattern.as_deref(), page.limit, page.offset).await?;
    Ok(users.into_iter().map(UserResponse::from).collect())
}

pub async fn find(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<UserResponse> {
    authorize(&state.pool, actor, Action::View, ModelKind::User).await?;
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .map(UserResponse::from)
        .ok_or_else(|| not_found(ENTITY, id))
}

/// Create a local user with profile and default permissions. Unlike
/// registration this never touches the identity provider.
pub async fn create(
    state: &AppState,
    actor: &AuthUser,
    input: &RegisterUser,
) -> AppResult<UserResponse> {
    authorize(&state.pool, actor, Action::Add, ModelKind::User).await?;
    input.validate()?;
    if UserRepo::find_by_email(&state.pool, &input.email).await?.is_some() {
        return Err(CoreError::Conflict("User already exists".into()).into());
    }
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let create = CreateUser {
        email: input.email.clone(),
        password_hash,
        ..Default::default()
    };
    let user =
        UserRepo::create_with_profile(&state.pool, &create, &state.config.default_user_permissions)
            .await?;
    tracing::info!(user_id = user.id, created_by = actor.user_id, "User created");
    Ok(UserResponse::from(user))
}

pub async fn update(
    state: &AppState,
    actor: &AuthUser,
    id: DbId,
    input: &UpdateUserRequest,
) -> AppResult<UserResponse> {
    authorize(&state.pool, actor, Action::Change, ModelKind::User).await?;
    let update = to_update(actor, input)?;
    UserRepo::update(&state.pool, id, &update)
        .await?
        .map(UserResponse::from)
        .ok_or_else(|| not_found(ENTITY, id))
}

pub async fn delete(state: &AppState, actor: &AuthUser, id: DbId) -> AppResult<()> {
    authorize(&state.pool, actor, Action::Delete, ModelKind::User).await?;
    if UserRepo::delete(&state.pool, id).await? {
        tracing::info!(user_id = id, deleted_by = actor.user_id, "User deleted");
        Ok(())
    } else {
        Err(not_found(ENTITY, id))
    }
}

/// The caller with profile. Needs no model permission.
pub async fn me(state: &AppState, actor: &AuthUser) -> AppResult<UserDetail> {
    let user = UserRepo::find_by_id(&state.pool, actor.user_id)
        .await?
        .ok_or_else(|| not_found(ENTITY, actor.user_id))?;
    let profile = ProfileRepo::find_by_user_id(&state.pool, actor.user_id).await?;
    Ok(UserDetail {
        user: UserResponse::from(user),
        profile,
    })
}

/// Update the caller's own email and/or password.
pub async fn update_me(
    state: &AppState,
    actor: &AuthUser,
    input: &UpdateUserRequest,
) -> AppResult<UserDetail> {
    let update = to_update(actor, input)?;
    UserRepo::update(&state.pool, actor.user_id, &update)
        .await?
        .ok_or_else(|| not_found(ENTITY, actor.user_id))?;
    tracing::info!(user_id = actor.user_id, "Account updated");
    me(state, actor).await
}
