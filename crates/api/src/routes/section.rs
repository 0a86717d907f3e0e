//! Route definitions for the `/sections` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::section;
use crate::state::AppState;

/// Routes mounted at `/sections`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// PATCH  /{id}                      -> update
/// DELETE /{id}                      -> delete
/// POST   /{id}/move                 -> move_after
/// POST   /{id}/work-items/renumber  -> renumber_work_items
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(section::list).post(section::create))
        .route(
            "/{id}",
            get(section::get_by_id)
                .put(section::update)
                .patch(section::update)
                .delete(section::delete),
        )
        .route("/{id}/move", post(section::move_after))
        .route("/{id}/work-items/renumber", post(section::renumber_work_items))
}
