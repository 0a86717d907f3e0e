//! Account lifecycle: credential resolution, identity provisioning,
//! registration, token issuance and the bootstrap superuser.

use serde::{Deserialize, Serialize};
use validator::Validate;
use workbound_core::error::CoreError;
use workbound_db::models::user::{CreateUser, RegisterUser, User, UserResponse};
use workbound_db::repositories::{AuthTokenRepo, UserRepo};
use workbound_events::AccountEvent;

use crate::auth::identity::{IdentityError, VerifiedIdentity};
use crate::auth::password::{generate_password, hash_password, verify_password};
use crate::auth::token::{generate_api_token, hash_api_token};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::auth::Credential;
use crate::state::AppState;

/// Returned for unknown email, wrong password and inactive account alike.
const BAD_CREDENTIALS: &str = "Unable to log in with provided credentials.";

/// Email/password pair exchanged for an API token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// A freshly issued API token. The plaintext is only ever returned here.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: UserResponse,
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Resolve a credential to an active local user.
pub async fn authenticate(state: &AppState, credential: Credential<'_>) -> AppResult<User> {
    let user = match credential {
        Credential::Token(key) => AuthTokenRepo::find_active_user(&state.pool, &hash_api_token(key))
            .await?
            .ok_or_else(|| CoreError::Unauthorized("Invalid token.".into()))?,
        Credential::Bearer(token) => {
            let identity = state.identity.as_ref().ok_or_else(|| {
                CoreError::Unauthorized("Identity provider is not configured".into())
            })?;
            let verified = identity.verify_token(token).await.map_err(|e| {
                tracing::warn!(error = %e, "Identity token rejected");
                CoreError::Unauthorized("Invalid or expired token".into())
            })?;
            resolve_identity(state, &verified).await?
        }
    };

    if !user.is_active {
        return Err(CoreError::Unauthorized("User inactive or deleted.".into()).into());
    }
    Ok(user)
}

/// Map a verified identity to its local user, provisioning one if needed.
///
/// Lookup order: by provider UID, then by email (backfilling the UID), then
/// create user + profile + default permissions in one transaction. Matching
/// by email requires the provider to have verified that address. A
/// concurrent first request for the same email loses the insert race on
/// `uq_users_email` and re-reads the winner's row.
pub async fn resolve_identity(state: &AppState, identity: &VerifiedIdentity) -> AppResult<User> {
    if let Some(user) = UserRepo::find_by_identity_uid(&state.pool, &identity.uid).await? {
        return Ok(user);
    }

    if let Some(user) = UserRepo::find_by_email(&state.pool, &identity.email).await? {
        if !identity.email_verified {
            tracing::warn!(
                user_id = user.id,
                uid = %identity.uid,
                "Unverified email matches a local user"
            );
            return Err(CoreError::Unauthorized("Email address not verified.".into()).into());
        }
        if user.identity_uid.is_some() {
            return Ok(user);
        }
        tracing::info!(user_id = user.id, uid = %identity.uid, "Linking identity to existing user");
        let linked = UserRepo::set_identity_uid(&state.pool, user.id, &identity.uid)
            .await?
            .unwrap_or(user);
        return Ok(linked);
    }

    let input = CreateUser {
        email: identity.email.clone(),
        password_hash: hash(&generate_password())?,
        identity_uid: Some(identity.uid.clone()),
        ..Default::default()
    };
    match UserRepo::create_with_profile(&state.pool, &input, &state.config.default_user_permissions)
        .await
    {
        Ok(user) => {
            tracing::info!(
                user_id = user.id,
                email = %user.email,
                "Provisioned user from identity token"
            );
            Ok(user)
        }
        Err(err) => {
            let err = AppError::from(err);
            if !is_unique_violation(&err) {
                return Err(err);
            }
            UserRepo::find_by_email(&state.pool, &identity.email)
                .await?
                .ok_or(err)
        }
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Register a new account.
///
/// Creates the account at the identity provider (when configured), mails the
/// provider's verification link (best effort) and stores the local user with
/// the linked UID.
pub async fn register(state: &AppState, input: RegisterUser) -> AppResult<User> {
    input.validate()?;

    if UserRepo::find_by_email(&state.pool, &input.email).await?.is_some() {
        return Err(CoreError::Conflict("User already exists".into()).into());
    }

    let identity_uid = match &state.identity {
        Some(identity) => {
            let uid = identity
                .create_account(&input.email, &input.password)
                .await
                .map_err(|e| match e {
                    IdentityError::AccountExists => {
                        AppError::Core(CoreError::Conflict("User already exists".into()))
                    }
                    other => {
                        tracing::error!(
                            error = %other,
                            email = %input.email,
                            "Identity account creation failed"
                        );
                        AppError::InternalError(format!("Identity provider error: {other}"))
                    }
                })?;
            send_verification_email(state, &input.email).await;
            Some(uid)
        }
        None => None,
    };

    let create = CreateUser {
        email: input.email.clone(),
        password_hash: hash(&input.password)?,
        identity_uid,
        ..Default::default()
    };
    let user =
        UserRepo::create_with_profile(&state.pool, &create, &state.config.default_user_permissions)
            .await?;
    tracing::info!(user_id = user.id, email = %user.email, "Registered user");
    Ok(user)
}

/// Email the identity provider's verification link. Failures are logged and
/// never fail the registration.
async fn send_verification_email(state: &AppState, email: &str) {
    let Some(identity) = &state.identity else {
        return;
    };
    let link = match identity.email_verification_link(email).await {
        Ok(link) => link,
        Err(e) => {
            tracing::warn!(error = %e, email, "Could not generate verification link");
            return;
        }
    };
    let Some(mailer) = &state.email else {
        tracing::info!(email, "SMTP not configured, skipping verification email");
        return;
    };
    let event = AccountEvent::VerificationRequested {
        email: email.to_string(),
        link,
    };
    if let Err(e) = mailer.deliver(&event).await {
        tracing::warn!(error = %e, email, "Verification email failed");
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Exchange email + password for a new API token, rotating any previous one.
pub async fn issue_token(state: &AppState, input: &TokenRequest) -> AppResult<TokenResponse> {
    let bad_credentials = || AppError::Core(CoreError::Unauthorized(BAD_CREDENTIALS.into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(bad_credentials)?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid || !user.is_active {
        return Err(bad_credentials());
    }

    let (token, token_hash) = generate_api_token();
    AuthTokenRepo::replace_for_user(&state.pool, user.id, &token_hash).await?;
    UserRepo::record_login(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, "Issued API token");

    Ok(TokenResponse {
        token,
        user: UserResponse::from(user),
    })
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

/// Create the configured superuser when the users table is empty.
///
/// Returns the created user, or `None` if nothing was done.
pub async fn bootstrap_superuser(state: &AppState) -> AppResult<Option<User>> {
    let Some(superuser) = &state.config.superuser else {
        return Ok(None);
    };
    if UserRepo::count(&state.pool).await? > 0 {
        return Ok(None);
    }

    let input = CreateUser {
        email: superuser.email.clone(),
        password_hash: hash(&superuser.password)?,
        identity_uid: None,
        is_staff: true,
        is_superuser: true,
    };
    let user = UserRepo::create_with_profile(&state.pool, &input, &[]).await?;
    tracing::info!(user_id = user.id, email = %user.email, "Created bootstrap superuser");
    Ok(Some(user))
}
