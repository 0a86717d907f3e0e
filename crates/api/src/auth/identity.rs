//! External identity provider integration.
//!
//! [`IdentityProvider`] is the seam between the API and whichever service
//! issues end-user ID tokens. [`FirebaseIdentity`] is the production
//! implementation: it verifies RS256 ID tokens against the provider's
//! published JWKS and calls the Identity Toolkit REST API to create accounts
//! and mint email-verification links.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

/// Public signing keys for provider-issued ID tokens.
const JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Identity Toolkit REST base URL.
const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Issuer prefix; the project id is appended.
const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// How long fetched signing keys are reused before refetching.
const KEY_CACHE_TTL: Duration = Duration::from_secs(3600);

/// HTTP request timeout for calls to the provider.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// The identity a verified token speaks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Provider-assigned user id.
    pub uid: String,
    pub email: String,
    pub email_verified: bool,
}

/// Error type for identity provider failures.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Invalid identity token: {0}")]
    InvalidToken(String),

    #[error("Identity token carries no email")]
    MissingEmail,

    #[error("An account with this email already exists at the identity provider")]
    AccountExists,

    #[error("Identity provider is missing {0}")]
    NotConfigured(&'static str),

    #[error("Identity provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Identity provider returned HTTP {status}: {message}")]
    Provider { status: u16, message: String },
}

/// Verifies end-user tokens and manages accounts at the identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify an ID token and return the identity it asserts.
    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, IdentityError>;

    /// Create an account with email/password, returning the provider UID.
    async fn create_account(&self, email: &str, password: &str) -> Result<String, IdentityError>;

    /// Produce a link the user follows to verify `email`.
    async fn email_verification_link(&self, email: &str) -> Result<String, IdentityError>;
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Configuration for the Firebase identity provider.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub project_id: String,
    /// Web API key, needed for account creation.
    pub api_key: Option<String>,
    /// OAuth access token of a service account, needed for verification links.
    pub access_token: Option<String>,
}

impl FirebaseConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `FIREBASE_PROJECT_ID` is not set, which disables
    /// bearer-token authentication altogether.
    ///
    /// | Variable                | Required | Default |
    /// |-------------------------|----------|---------|
    /// | `FIREBASE_PROJECT_ID`   | yes      |         |
    /// | `FIREBASE_API_KEY`      | no       |         |
    /// | `FIREBASE_ACCESS_TOKEN` | no       |         |
    pub fn from_env() -> Option<Self> {
        let project_id = std::env::var("FIREBASE_PROJECT_ID")
            .ok()
            .filter(|s| !s.is_empty())?;
        Some(Self {
            project_id,
            api_key: std::env::var("FIREBASE_API_KEY").ok(),
            access_token: std::env::var("FIREBASE_ACCESS_TOKEN").ok(),
        })
    }

    pub fn issuer(&self) -> String {
        format!("{ISSUER_PREFIX}{}", self.project_id)
    }

    /// Token validation rules: RS256, audience = project id, provider issuer.
    pub fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[self.issuer()]);
        validation.set_required_spec_claims(&["exp", "aud", "iss", "sub"]);
        validation
    }
}

// ---------------------------------------------------------------------------
// Firebase implementation
// ---------------------------------------------------------------------------

/// Claims read from a provider ID token. `exp`, `aud` and `iss` are checked
/// by [`Validation`] and not needed afterwards.
#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
}

impl IdTokenClaims {
    fn into_identity(self) -> Result<VerifiedIdentity, IdentityError> {
        if self.sub.is_empty() {
            return Err(IdentityError::InvalidToken("empty subject".into()));
        }
        let email = self
            .email
            .filter(|e| !e.is_empty())
            .ok_or(IdentityError::MissingEmail)?;
        Ok(VerifiedIdentity {
            uid: self.sub,
            email,
            email_verified: self.email_verified,
        })
    }
}

struct CachedKeys {
    keys: Arc<JwkSet>,
    fetched_at: Instant,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    local_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeResponse {
    oob_link: String,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

/// Firebase Authentication backed [`IdentityProvider`].
pub struct FirebaseIdentity {
    config: FirebaseConfig,
    client: reqwest::Client,
    keys: RwLock<Option<CachedKeys>>,
}

impl FirebaseIdentity {
    pub fn new(config: FirebaseConfig) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            config,
            client,
            keys: RwLock::new(None),
        })
    }

    /// Current signing keys, refetched once the cache is older than [`KEY_CACHE_TTL`].
    async fn signing_keys(&self) -> Result<Arc<JwkSet>, IdentityError> {
        {
            let cached = self.keys.read().await;
            if let Some(cached) = cached.as_ref() {
                if cached.fetched_at.elapsed() < KEY_CACHE_TTL {
                    return Ok(Arc::clone(&cached.keys));
                }
            }
        }

        let keys: JwkSet = self
            .client
            .get(JWKS_URL)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let keys = Arc::new(keys);
        tracing::debug!(count = keys.keys.len(), "Refreshed identity provider signing keys");

        *self.keys.write().await = Some(CachedKeys {
            keys: Arc::clone(&keys),
            fetched_at: Instant::now(),
        });
        Ok(keys)
    }

    async fn post_toolkit<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, IdentityError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let message = response
            .json::<ProviderErrorBody>()
            .await
            .map(|body| body.error.message)
            .unwrap_or_else(|_| status.to_string());
        if message.starts_with("EMAIL_EXISTS") {
            return Err(IdentityError::AccountExists);
        }
        Err(IdentityError::Provider {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let header =
            decode_header(token).map_err(|e| IdentityError::InvalidToken(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| IdentityError::InvalidToken("missing key id".into()))?;

        let keys = self.signing_keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| IdentityError::InvalidToken(format!("unknown key id {kid}")))?;
        let key =
            DecodingKey::from_jwk(jwk).map_err(|e| IdentityError::InvalidToken(e.to_string()))?;

        let data = decode::<IdTokenClaims>(token, &key, &self.config.validation())
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))?;
        data.claims.into_identity()
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<String, IdentityError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(IdentityError::NotConfigured("FIREBASE_API_KEY"))?;

        let request = self
            .client
            .post(format!("{IDENTITY_TOOLKIT_URL}/accounts:signUp"))
            .query(&[("key", api_key)])
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": false,
            }));
        let created: SignUpResponse = self.post_toolkit(request).await?;
        tracing::info!(email, uid = %created.local_id, "Created identity provider account");
        Ok(created.local_id)
    }

    async fn email_verification_link(&self, email: &str) -> Result<String, IdentityError> {
        let access_token = self
            .config
            .access_token
            .as_deref()
            .ok_or(IdentityError::NotConfigured("FIREBASE_ACCESS_TOKEN"))?;

        let request = self
            .client
            .post(format!(
                "{IDENTITY_TOOLKIT_URL}/projects/{}/accounts:sendOobCode",
                self.config.project_id
            ))
            .bearer_auth(access_token)
            .json(&serde_json::json!({
                "requestType": "VERIFY_EMAIL",
                "email": email,
                "returnOobLink": true,
            }));
        let response: OobCodeResponse = self.post_toolkit(request).await?;
        Ok(response.oob_link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FirebaseConfig {
        FirebaseConfig {
            project_id: "workbound-dev".to_string(),
            api_key: None,
            access_token: None,
        }
    }

    #[test]
    fn validation_pins_audience_and_issuer() {
        let validation = config().validation();
        assert_eq!(validation.algorithms, vec![Algorithm::RS256]);
        assert!(validation
            .aud
            .as_ref()
            .is_some_and(|aud| aud.contains("workbound-dev")));
        assert!(validation
            .iss
            .as_ref()
            .is_some_and(|iss| iss.contains("https://securetoken.google.com/workbound-dev")));
    }

    #[test]
    fn claims_without_email_are_rejected() {
        let claims = IdTokenClaims {
            sub: "uid-1".into(),
            email: None,
            email_verified: false,
        };
        assert!(matches!(
            claims.into_identity(),
            Err(IdentityError::MissingEmail)
        ));
    }

    #[test]
    fn claims_map_to_identity() {
        let claims = IdTokenClaims {
            sub: "uid-1".into(),
            email: Some("ada@example.com".into()),
            email_verified: true,
        };
        let identity = claims.into_identity().unwrap();
        assert_eq!(identity.uid, "uid-1");
        assert_eq!(identity.email, "ada@example.com");
        assert!(identity.email_verified);
    }

    #[tokio::test]
    async fn account_creation_requires_api_key() {
        let provider = FirebaseIdentity::new(config()).unwrap();
        let err = provider
            .create_account("ada@example.com", "secret")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::NotConfigured("FIREBASE_API_KEY")));
    }

    #[test]
    fn malformed_token_is_invalid() {
        let err = decode_header("not-a-jwt").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
