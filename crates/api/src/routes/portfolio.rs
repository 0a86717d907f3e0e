//! Route definitions for the `/portfolios` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::portfolio;
use crate::state::AppState;

/// Routes mounted at `/portfolios`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id (with ordered sections)
/// PUT    /{id}                      -> update
/// PATCH  /{id}                      -> update
/// DELETE /{id}                      -> delete
/// POST   /{id}/sections/renumber    -> renumber_sections
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(portfolio::list).post(portfolio::create))
        .route(
            "/{id}",
            get(portfolio::get_by_id)
                .put(portfolio::update)
                .patch(portfolio::update)
                .delete(portfolio::delete),
        )
        .route("/{id}/sections/renumber", post(portfolio::renumber_sections))
}
