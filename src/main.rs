use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use volley_platform::api::{create_routes, AppState};
use volley_platform::auth::{JwtService, PasswordHasher};
use volley_platform::config::{AppConfig, DatabaseConfig, DatabaseSeeder, StorageBackend};
use volley_platform::store::{InMemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Read before AppConfig so config warnings are captured. RUST_LOG wins over LOG_LEVEL.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string())))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env()?;

    info!(environment = %config.environment, backend = ?config.storage_backend, "Starting volley platform");

    let state = match config.storage_backend {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = db_config.create_pool().await?;
            let store = Arc::new(PgStore::new(pool));
            store.migrate().await.context("failed to run migrations")?;
            info!("Database migrations applied");
            build_state(store, &config).await?
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on shutdown");
            build_state(Arc::new(InMemoryStore::new()), &config).await?
        }
    };

    let app = create_routes(state, &config.cors_origins);

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Volley platform listening on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state<S>(store: Arc<S>, config: &AppConfig) -> Result<AppState>
where
    S: Store + 'static,
{
    let jwt_service = JwtService::new(&config.jwt_secret, config.access_token_ttl());
    let hasher = PasswordHasher::new(config.bcrypt_cost);
    let state = AppState::new(store, jwt_service, hasher)?;

    DatabaseSeeder::new(state.users.clone(), state.clubs.clone())
        .seed_all(config.admin.as_ref(), config.seed_demo_data)
        .await?;

    Ok(state)
}
