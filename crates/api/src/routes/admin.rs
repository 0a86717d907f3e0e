//! Route definitions for `/admin` (superuser only).

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /users/{id}/permissions              -> list_permissions
/// POST   /users/{id}/permissions              -> grant_permission
/// DELETE /users/{id}/permissions/{codename}   -> revoke_permission
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{id}/permissions",
            get(admin::list_permissions).post(admin::grant_permission),
        )
        .route(
            "/users/{id}/permissions/{codename}",
            delete(admin::revoke_permission),
        )
}
