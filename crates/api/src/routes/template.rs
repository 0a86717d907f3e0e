//! Route definitions for the template resources `/categories` and `/tasks`.
//!
//! Both archive on DELETE and hide archived rows from lists unless
//! `?include_archived=true`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{category, task};
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete (archive)
/// ```
pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/", get(category::list).post(category::create))
        .route(
            "/{id}",
            get(category::get_by_id)
                .put(category::update)
                .patch(category::update)
                .delete(category::delete),
        )
}

/// Routes mounted at `/tasks`. Same shape as [`category_router`].
pub fn task_router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id)
                .put(task::update)
                .patch(task::update)
                .delete(task::delete),
        )
}
