pub mod admin;
pub mod health;
pub mod portfolio;
pub mod role;
pub mod section;
pub mod template;
pub mod user;
pub mod work_item;

use axum::routing::get;
use axum::Router;

use crate::graphql;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /graphql                                 GraphQL (POST), GraphiQL (GET)
///
/// /user/create                             register (public)
/// /user/token                              issue (public), revoke
/// /user/sync                               resolve bearer identity
/// /user/me                                 get, update
/// /user/me/profile                         update (multipart)
/// /user/perms                              caller's permissions by model
/// /user/perms/{model}                      caller's permissions for one model
///
/// /portfolios                              list, create
/// /portfolios/{id}                         get (with sections), update, delete
/// /portfolios/{id}/sections/renumber       renumber sections
///
/// /sections                                list, create
/// /sections/{id}                           get, update, delete
/// /sections/{id}/move                      move after a sibling
/// /sections/{id}/work-items/renumber       renumber work items
///
/// /work-items                              list, create
/// /work-items/{id}                         get, update, delete
/// /work-items/{id}/move                    move after a sibling
///
/// /categories                              list, create
/// /categories/{id}                         get, update, archive
///
/// /tasks                                   list, create
/// /tasks/{id}                              get, update, archive
///
/// /roles                                   list, create
/// /roles/mine                              caller's roles
/// /roles/{id}                              get, update, delete
/// /role-types                              list
///
/// /users                                   list, create
/// /users/{id}                              get, update, delete
///
/// /admin/users/{id}/permissions            list, grant (superuser)
/// /admin/users/{id}/permissions/{codename} revoke (superuser)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/graphql",
            get(graphql::graphiql).post(graphql::graphql_handler),
        )
        .nest("/user", user::account_router())
        .nest("/portfolios", portfolio::router())
        .nest("/sections", section::router())
        .nest("/work-items", work_item::router())
        .nest("/categories", template::category_router())
        .nest("/tasks", template::task_router())
        .nest("/roles", role::router())
        .nest("/role-types", role::role_type_router())
        .nest("/users", user::router())
        .nest("/admin", admin::router())
}
