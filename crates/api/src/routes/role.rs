//! Route definitions for `/roles` and `/role-types`.

use axum::routing::get;
use axum::Router;

use crate::handlers::role;
use crate::state::AppState;

/// Routes mounted at `/roles`.
///
/// ```text
/// GET    /        -> list (?category_id=)
/// POST   /        -> create
/// GET    /mine    -> mine
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(role::list).post(role::create))
        .route("/mine", get(role::mine))
        .route(
            "/{id}",
            get(role::get_by_id)
                .put(role::update)
                .patch(role::update)
                .delete(role::delete),
        )
}

/// Routes mounted at `/role-types`.
///
/// ```text
/// GET    /        -> list_role_types
/// ```
pub fn role_type_router() -> Router<AppState> {
    Router::new().route("/", get(role::list_role_types))
}
