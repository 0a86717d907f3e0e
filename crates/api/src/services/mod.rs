//! Service layer shared by the REST handlers and the GraphQL resolvers.
//!
//! Every operation takes the application state and the acting user, runs the
//! permission checks, injects `created_by` where the model has one, and then
//! calls into the repositories. Handlers and resolvers only translate
//! transport types in and out.

pub mod accounts;
pub mod authz;
pub mod categories;
pub mod permissions;
pub mod portfolios;
pub mod profiles;
pub mod roles;
pub mod sections;
pub mod tasks;
pub mod users;
pub mod work_items;

use serde::Deserialize;
use workbound_core::error::CoreError;
use workbound_core::types::DbId;

use crate::error::AppError;

/// 404 for a missing row of `entity`.
pub(crate) fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

/// Body of the `move` endpoints: place the row directly after `after_id`,
/// or first among its siblings when `after_id` is absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoveRequest {
    pub after_id: Option<DbId>,
}
