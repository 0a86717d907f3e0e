//! Credential-based authentication extractors for Axum handlers.
//!
//! The `Authorization` header carries one of two credentials:
//!
//! - `Token <key>` -- an opaque API token issued by `POST /user/token`.
//! - `Bearer <jwt>` -- an ID token from the external identity provider.
//!   Unknown identities are provisioned as local users on first sight.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use workbound_core::error::CoreError;
use workbound_core::types::DbId;
use workbound_db::models::user::User;

use crate::error::AppError;
use crate::services::accounts;
use crate::state::AppState;

/// A parsed `Authorization` header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential<'a> {
    /// Opaque local API token.
    Token(&'a str),
    /// Identity-provider ID token.
    Bearer(&'a str),
}

impl<'a> Credential<'a> {
    /// Parse an `Authorization` header value. The scheme is case-insensitive.
    pub fn parse(header: &'a str) -> Result<Self, CoreError> {
        let (scheme, value) = header.trim().split_once(' ').ok_or_else(|| {
            CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Token <key> or Bearer <token>".into(),
            )
        })?;
        let value = value.trim();
        if value.is_empty() {
            return Err(CoreError::Unauthorized(
                "Invalid Authorization header. No credentials provided.".into(),
            ));
        }
        if scheme.eq_ignore_ascii_case("token") {
            Ok(Credential::Token(value))
        } else if scheme.eq_ignore_ascii_case("bearer") {
            Ok(Credential::Bearer(value))
        } else {
            Err(CoreError::Unauthorized(format!(
                "Unsupported authorization scheme '{scheme}'"
            )))
        }
    }
}

/// Authenticated user resolved from the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    pub email: String,
    pub is_staff: bool,
    /// Superusers pass every model permission check.
    pub is_superuser: bool,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
        }
    }
}

/// Read the raw `Authorization` header, if any.
fn authorization_header(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = authorization_header(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Authentication credentials were not provided.".into(),
            ))
        })?;
        let credential = Credential::parse(header)?;
        let user = accounts::authenticate(state, credential).await?;
        Ok(AuthUser::from(&user))
    }
}

/// Like [`AuthUser`], but a missing or rejected credential yields `None`
/// instead of a 401. Used by the GraphQL endpoint, where each field decides
/// whether it needs a caller.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if authorization_header(parts).is_none() {
            return Ok(OptionalAuthUser(None));
        }
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(OptionalAuthUser(Some(user))),
            Err(err) => {
                tracing::debug!(error = %err, "Treating caller as anonymous");
                Ok(OptionalAuthUser(None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_both_schemes() {
        assert_matches!(Credential::parse("Token abc"), Ok(Credential::Token("abc")));
        assert_matches!(Credential::parse("Bearer x.y.z"), Ok(Credential::Bearer("x.y.z")));
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert_matches!(Credential::parse("bearer x.y.z"), Ok(Credential::Bearer("x.y.z")));
        assert_matches!(Credential::parse("TOKEN abc"), Ok(Credential::Token("abc")));
    }

    #[test]
    fn rejects_malformed_headers() {
        assert_matches!(Credential::parse("abc"), Err(CoreError::Unauthorized(_)));
        assert_matches!(Credential::parse("Token   "), Err(CoreError::Unauthorized(_)));
        assert_matches!(Credential::parse("Basic dXNlcjpwdw=="), Err(CoreError::Unauthorized(_)));
    }
}
