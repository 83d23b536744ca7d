use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zk_login::{
    api::{create_router, AppState},
    config::Config,
    crypto::ProofSystem,
    error::AuthError,
    store::SqliteCredentialStore,
};

#[tokio::main]
async fn main() -> Result<(), AuthError> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,zk_login=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting zk-login server v{}...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Arc::new(Config::from_env()?);
    tracing::info!("Configuration loaded");

    // Setup database with proper connection pooling
    let db = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .connect(&config.database_url)
        .await?;

    tracing::info!("Database connected: {}", config.database_url);

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .map_err(|e| AuthError::Internal(format!("Migration failed: {}", e)))?;

    tracing::info!("Database migrations completed");

    // One-time trusted setup, or load cached keys. The verification key is
    // fixed for the process lifetime from here on.
    let proof_system = ProofSystem::setup(&config.zk_keys_dir)?;
    tracing::info!("ZK proof system initialized");

    let state = AppState {
        store: Arc::new(SqliteCredentialStore::new(db)),
        vk: Arc::new(proof_system.verifying_key),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API Endpoints:");
    tracing::info!("  POST /api/auth/signup     - Register a commitment");
    tracing::info!("  GET  /api/auth/login-data - Fetch salt and commitment");
    tracing::info!("  POST /api/auth/login      - Login with ZK proof");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AuthError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AuthError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
