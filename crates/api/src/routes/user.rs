//! Route definitions for `/users` and the caller's own `/user` account.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{account, user};
use crate::state::AppState;

/// Upper bound for a profile image upload.
const MAX_PROFILE_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /        -> list (?email=)
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list).post(user::create))
        .route(
            "/{id}",
            get(user::get_by_id)
                .put(user::update)
                .patch(user::update)
                .delete(user::delete),
        )
}

/// Routes mounted at `/user`.
///
/// ```text
/// POST   /create          -> register (public)
/// POST   /token           -> issue_token (public)
/// DELETE /token           -> revoke_token
/// POST   /sync            -> sync
/// GET    /me              -> me
/// PUT    /me              -> update_me
/// PATCH  /me              -> update_me
/// PUT    /me/profile      -> update_profile (multipart)
/// PATCH  /me/profile      -> update_profile (multipart)
/// GET    /perms           -> my_permissions
/// GET    /perms/{model}   -> my_model_permissions
/// ```
pub fn account_router() -> Router<AppState> {
    Router::new()
        .route("/create", post(account::register))
        .route(
            "/token",
            post(account::issue_token).delete(account::revoke_token),
        )
        .route("/sync", post(account::sync))
        .route(
            "/me",
            get(account::me)
                .put(account::update_me)
                .patch(account::update_me),
        )
        .route(
            "/me/profile",
            put(account::update_profile)
                .patch(account::update_profile)
                .layer(DefaultBodyLimit::max(MAX_PROFILE_UPLOAD_BYTES)),
        )
        .route("/perms", get(account::my_permissions))
        .route("/perms/{model}", get(account::my_model_permissions))
}
