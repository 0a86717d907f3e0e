use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workbound_api::auth::identity::{FirebaseIdentity, IdentityProvider};
use workbound_api::config::ServerConfig;
use workbound_api::router::build_app_router;
use workbound_api::services::accounts;
use workbound_api::state::AppState;
use workbound_db::DbPool;
use workbound_events::{EmailConfig, EmailDelivery};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workbound_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = wait_for_database(&database_url, config.db_connect_attempts).await;
    tracing::info!("Database health check passed");

    workbound_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Identity provider ---
    let identity: Option<Arc<dyn IdentityProvider>> = config.identity.clone().map(|c| {
        let provider = FirebaseIdentity::new(c).expect("Failed to build identity provider client");
        Arc::new(provider) as Arc<dyn IdentityProvider>
    });
    if identity.is_none() {
        tracing::warn!("FIREBASE_PROJECT_ID not set, bearer-token authentication disabled");
    }

    // --- Email ---
    let email = EmailConfig::from_env().map(|c| Arc::new(EmailDelivery::new(c)));
    if email.is_none() {
        tracing::warn!("SMTP_HOST not set, verification emails disabled");
    }

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        identity,
        email,
        schema: workbound_api::graphql::build_schema(),
    };

    accounts::bootstrap_superuser(&state)
        .await
        .expect("Failed to create bootstrap superuser");

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Connect and health-check the database, retrying once a second.
///
/// Panics after `attempts` failures.
async fn wait_for_database(database_url: &str, attempts: u32) -> DbPool {
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        let result = match workbound_db::create_pool(database_url).await {
            Ok(pool) => workbound_db::health_check(&pool).await.map(|()| pool),
            Err(e) => Err(e),
        };
        match result {
            Ok(pool) => return pool,
            Err(e) if attempt < attempts => {
                tracing::warn!(attempt, error = %e, "Database unavailable, waiting 1 second");
                tokio::time::sleep(Duration::from_secs(1)).await;
                attempt += 1;
            }
            Err(e) => panic!("Database unavailable after {attempts} attempts: {e}"),
        }
    }
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
