//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a `Token` or `Bearer` credential.
//! - [`auth::OptionalAuthUser`] -- Same, but anonymous callers yield `None`.
//! - [`rbac::RequireSuperuser`] -- Requires a superuser.

pub mod auth;
pub mod rbac;
