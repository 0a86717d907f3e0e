#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use workbound_api::auth::identity::{IdentityError, IdentityProvider, VerifiedIdentity};
use workbound_api::auth::password::hash_password;
use workbound_api::auth::token::generate_api_token;
use workbound_api::config::ServerConfig;
use workbound_api::graphql::build_schema;
use workbound_api::router::build_app_router;
use workbound_api::state::AppState;
use workbound_db::models::user::{CreateUser, User};
use workbound_db::repositories::{AuthTokenRepo, PermissionRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults.
///
/// Profile images land in a fresh temporary directory per call.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_root: media_dir(),
        default_user_permissions: Vec::new(),
        db_connect_attempts: 1,
        superuser: None,
        identity: None,
    }
}

fn media_dir() -> PathBuf {
    tempfile::tempdir()
        .expect("tempdir should be creatable")
        .into_path()
}

/// Build the full application router (same middleware stack as `main.rs`)
/// with no identity provider and no mailer.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with(pool, test_config(), None)
}

/// Build the router with [`MockIdentity`] wired in for bearer tokens.
pub fn build_test_app_with_identity(pool: PgPool) -> Router {
    build_app_with(pool, test_config(), Some(Arc::new(MockIdentity)))
}

pub fn build_app_with(
    pool: PgPool,
    config: ServerConfig,
    identity: Option<Arc<dyn IdentityProvider>>,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        identity,
        email: None,
        schema: build_schema(),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Identity provider stand-in
// ---------------------------------------------------------------------------

/// Accepts bearer tokens of the form `<uid>|<email>`, with an optional
/// `|unverified` suffix for addresses the provider has not verified.
///
/// Accounts created through it get the UID `uid-<email>`. The address
/// `taken@example.com` already exists at the provider.
pub struct MockIdentity;

#[async_trait]
impl IdentityProvider for MockIdentity {
    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let mut parts = token.split('|');
        let (Some(uid), Some(email)) = (parts.next(), parts.next()) else {
            return Err(IdentityError::InvalidToken("malformed test token".into()));
        };
        Ok(VerifiedIdentity {
            uid: uid.to_string(),
            email: email.to_string(),
            email_verified: parts.next() != Some("unverified"),
        })
    }

    async fn create_account(&self, email: &str, _password: &str) -> Result<String, IdentityError> {
        if email == "taken@example.com" {
            return Err(IdentityError::AccountExists);
        }
        Ok(format!("uid-{email}"))
    }

    async fn email_verification_link(&self, email: &str) -> Result<String, IdentityError> {
        Ok(format!("https://auth.example.com/verify?email={email}"))
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Insert a user (with profile) directly and return it with an API token.
pub async fn create_user_with_token(pool: &PgPool, email: &str) -> (User, String) {
    create_account(pool, email, false).await
}

/// Same as [`create_user_with_token`] for a superuser.
pub async fn create_superuser_with_token(pool: &PgPool, email: &str) -> (User, String) {
    create_account(pool, email, true).await
}

async fn create_account(pool: &PgPool, email: &str, superuser: bool) -> (User, String) {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        identity_uid: None,
        is_staff: superuser,
        is_superuser: superuser,
    };
    let user = UserRepo::create_with_profile(pool, &input, &[])
        .await
        .expect("user creation should succeed");
    let (token, token_hash) = generate_api_token();
    AuthTokenRepo::replace_for_user(pool, user.id, &token_hash)
        .await
        .expect("token storage should succeed");
    (user, token)
}

/// Grant permission codenames to a user.
pub async fn grant(pool: &PgPool, user_id: i64, codenames: &[&str]) {
    for codename in codenames {
        PermissionRepo::grant(pool, user_id, codename)
            .await
            .expect("grant should succeed")
            .expect("codename should exist");
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    auth: Option<String>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");
    app.oneshot(request).await.expect("router should respond")
}

fn token_header(token: &str) -> Option<String> {
    Some(format!("Token {token}"))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, token_header(token), None).await
}

/// GET with `Authorization: Bearer <token>`.
pub async fn get_bearer(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(format!("Bearer {token}")), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, token_header(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, token_header(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, token_header(token), None).await
}

/// Multipart PUT. Each part is `(name, filename, bytes)`.
pub async fn put_multipart_auth(
    app: Router,
    uri: &str,
    parts: &[(&str, Option<&str>, &[u8])],
    token: &str,
) -> Response<Body> {
    const BOUNDARY: &str = "workbound-test-boundary";
    let mut body = Vec::new();
    for (name, filename, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Token {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request should build");
    app.oneshot(request).await.expect("router should respond")
}

/// POST a GraphQL document, optionally authenticated with an API token.
pub async fn graphql(
    app: Router,
    query: &str,
    variables: serde_json::Value,
    token: Option<&str>,
) -> serde_json::Value {
    let body = serde_json::json!({ "query": query, "variables": variables });
    let response = send(
        app,
        Method::POST,
        "/api/v1/graphql",
        token.and_then(token_header),
        Some(body),
    )
    .await;
    body_json(response).await
}
