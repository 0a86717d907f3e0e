use std::path::PathBuf;

use crate::auth::identity::FirebaseConfig;

/// Credentials for the account created on first start.
#[derive(Debug, Clone)]
pub struct SuperuserConfig {
    pub email: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory profile images are written to (default: `./media`).
    pub media_root: PathBuf,
    /// Permission codenames granted to every new user.
    pub default_user_permissions: Vec<String>,
    /// How many times startup retries the database before giving up.
    pub db_connect_attempts: u32,
    /// Bootstrap superuser, created when the users table is empty.
    pub superuser: Option<SuperuserConfig>,
    /// External identity provider. `None` disables bearer-token auth.
    pub identity: Option<FirebaseConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `MEDIA_ROOT`               | `./media`                  |
    /// | `DEFAULT_USER_PERMISSIONS` | empty                      |
    /// | `DB_CONNECT_ATTEMPTS`      | `30`                       |
    /// | `SUPERUSER_EMAIL`          | unset                      |
    /// | `SUPERUSER_PASSWORD`       | unset                      |
    ///
    /// Identity-provider variables are documented on [`FirebaseConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let media_root = PathBuf::from(
            std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "./media".into()),
        );

        let default_user_permissions =
            split_list(&std::env::var("DEFAULT_USER_PERMISSIONS").unwrap_or_default());

        let db_connect_attempts: u32 = std::env::var("DB_CONNECT_ATTEMPTS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("DB_CONNECT_ATTEMPTS must be a valid u32");

        let superuser = match (
            std::env::var("SUPERUSER_EMAIL").ok(),
            std::env::var("SUPERUSER_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some(SuperuserConfig { email, password })
            }
            _ => None,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            media_root,
            default_user_permissions,
            db_connect_attempts,
            superuser,
            identity: FirebaseConfig::from_env(),
        }
    }
}

/// Split a comma-separated env value, dropping blanks.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_skips_blanks() {
        assert_eq!(
            split_list(" view_task, add_task ,,"),
            vec!["view_task".to_string(), "add_task".to_string()]
        );
        assert!(split_list("").is_empty());
    }
}
