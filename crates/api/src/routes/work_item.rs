//! Route definitions for the `/work-items` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::work_item;
use crate::state::AppState;

/// Routes mounted at `/work-items`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update   (assignee or category manager)
/// PATCH  /{id}          -> update
/// DELETE /{id}          -> delete   (assignee or category manager)
/// POST   /{id}/move     -> move_after
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(work_item::list).post(work_item::create))
        .route(
            "/{id}",
            get(work_item::get_by_id)
                .put(work_item::update)
                .patch(work_item::update)
                .delete(work_item::delete),
        )
        .route("/{id}/move", post(work_item::move_after))
}
