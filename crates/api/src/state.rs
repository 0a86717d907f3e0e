use std::sync::Arc;

use workbound_events::EmailDelivery;

use crate::auth::identity::IdentityProvider;
use crate::config::ServerConfig;
use crate::graphql::WorkboundSchema;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: workbound_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// External identity provider. `None` when `FIREBASE_PROJECT_ID` is unset.
    pub identity: Option<Arc<dyn IdentityProvider>>,
    /// SMTP mailer. `None` when `SMTP_HOST` is unset.
    pub email: Option<Arc<EmailDelivery>>,
    /// GraphQL schema served at `/api/v1/graphql`.
    pub schema: WorkboundSchema,
}
