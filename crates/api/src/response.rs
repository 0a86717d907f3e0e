//! Shared response envelope types for API handlers.
//!
//! List endpoints answer with `{ "data": [...] }`; single-object endpoints
//! return the object itself.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
