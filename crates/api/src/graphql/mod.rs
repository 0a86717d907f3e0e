//! GraphQL surface over the service layer.
//!
//! Each request carries the [`AppState`] and the optional caller as schema
//! data. Resolvers call the same services as the REST handlers; errors are
//! mapped by [`gql_error`] so permission denials keep the fixed message and
//! missing rows read "<Entity> matching query does not exist."

pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::http::GraphiQLSource;
use async_graphql::{Context, EmptySubscription, ErrorExtensions, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use workbound_core::error::CoreError;

use crate::error::AppError;
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::services::authz::require_actor;
use crate::state::AppState;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type WorkboundSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema. Request-scoped data is attached in [`graphql_handler`].
pub fn build_schema() -> WorkboundSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription).finish()
}

/// POST /api/v1/graphql
pub async fn graphql_handler(
    State(state): State<AppState>,
    OptionalAuthUser(user): OptionalAuthUser,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let request = request.into_inner().data(state.clone()).data(user);
    state.schema.execute(request).await.into()
}

/// GET /api/v1/graphql -- GraphiQL explorer.
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/api/v1/graphql").finish())
}

/// Convert a service error into a GraphQL error entry.
pub fn gql_error(err: AppError) -> async_graphql::Error {
    if let AppError::Core(CoreError::NotFound { entity, .. }) = &err {
        return async_graphql::Error::new(format!("{entity} matching query does not exist."))
            .extend_with(|_, e| e.set("code", "NOT_FOUND"));
    }

    let (_, code, message) = err.classify();
    let fields = match &err {
        AppError::Core(CoreError::InvalidFields(fields)) => serde_json::to_value(fields)
            .ok()
            .and_then(|v| async_graphql::Value::from_json(v).ok()),
        _ => None,
    };

    async_graphql::Error::new(message).extend_with(|_, e| {
        e.set("code", code);
        if let Some(fields) = &fields {
            e.set("fields", fields.clone());
        }
    })
}

/// The application state attached to the request.
pub(crate) fn app_state<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a AppState> {
    ctx.data::<AppState>()
}

/// The authenticated caller, or the fixed permission denial for anonymous requests.
pub(crate) fn actor<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a AuthUser> {
    let user = ctx.data::<Option<AuthUser>>()?.as_ref();
    require_actor(user).map_err(|e| gql_error(AppError::Core(e)))
}
